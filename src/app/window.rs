// SPDX-License-Identifier: MPL-2.0
//! Main puzzle window.
//!
//! Only the shell lives here: a localized title, a greeting and a quit
//! button. The board and pieces are drawn by the game itself.

use super::Message;
use crate::i18n::catalog::Translator;
use iced::widget::{button, column, container, text};
use iced::{window, Alignment, Element, Length, Size, Task};
use std::path::PathBuf;

pub const WINDOW_DEFAULT_WIDTH: f32 = 640.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 480.0;

pub struct PuzzleWindow {
    translator: Translator,
    data_dir: PathBuf,
}

impl PuzzleWindow {
    pub fn new(translator: Translator, data_dir: PathBuf) -> Self {
        Self {
            translator,
            data_dir,
        }
    }

    pub fn title(&self) -> String {
        self.translator.tr("window-title")
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Quit => {
                log::debug!("Quit requested");
                iced::exit()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content = column![
            text(self.translator.tr("welcome")).size(20),
            text(format!(
                "{}: {}",
                self.translator.tr("data-directory"),
                self.data_dir.display()
            ))
            .size(12),
            button(text(self.translator.tr("quit"))).on_press(Message::Quit),
        ]
        .spacing(16)
        .align_x(Alignment::Center);

        container(content).center(Length::Fill).into()
    }
}

fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        ..window::Settings::default()
    }
}

/// Shows the window and runs the event loop until it is closed.
pub fn run(window: PuzzleWindow) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires the boot function to be Fn; the window is moved
    // out on the single call.
    let boot_state = RefCell::new(Some(window));
    let boot = move || {
        let window = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        (window, Task::none())
    };

    iced::application(boot, PuzzleWindow::update, PuzzleWindow::view)
        .title(PuzzleWindow::title)
        .window(window_settings())
        .run()
}
