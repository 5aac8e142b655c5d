// SPDX-License-Identifier: MPL-2.0
use iqpuzzle::app::{self, Flags};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-v", "--version"]) {
        eprintln!("{}\t{}", app::APP_NAME, app::APP_VERSION);
        return ExitCode::SUCCESS;
    }

    let flags = Flags {
        debug: args.contains("--debug"),
        lang: args.opt_value_from_str("--lang").unwrap_or_else(|err| {
            eprintln!("Ignoring --lang: {}", err);
            None
        }),
    };

    ExitCode::from(app::run(flags))
}
