//! Terminal front end for the chat widget.
//!
//! Lines typed on stdin are submitted to the chat endpoint; `/open`,
//! `/close` and `/quit` drive the panel.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::client::HttpChatClient;
use crate::widget::{ChatController, ChatView, Message, Sender, SubmissionId, WidgetState};

/// [`ChatView`] that echoes the widget to a writer as it changes.
#[derive(Debug)]
pub struct TerminalView<W> {
    state: WidgetState,
    out: Mutex<W>,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            state: WidgetState::new(),
            out: Mutex::new(out),
        }
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn print(&self, line: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        // A closed stdout is not worth failing the chat over.
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }
}

impl<W: Write + Send> ChatView for TerminalView<W> {
    fn show_panel(&self) {
        self.state.show_panel();
        self.print("[chat opened]");
    }

    fn hide_panel(&self) {
        self.state.hide_panel();
        self.print("[chat closed: type /open to reopen]");
    }

    fn input(&self) -> String {
        self.state.input()
    }

    fn clear_input(&self) {
        self.state.clear_input();
    }

    fn append_message(&self, message: Message) {
        // The user already sees what they typed.
        if message.sender == Sender::Bot {
            self.print(&format!("{}> {}", message.sender.label(), message.text));
        }
        self.state.append_message(message);
    }

    fn show_pending(&self, id: SubmissionId) {
        self.state.show_pending(id);
        self.print("bot> ...");
    }

    fn clear_pending(&self, id: SubmissionId) {
        self.state.clear_pending(id);
    }

    fn scroll_to_bottom(&self) {
        self.state.scroll_to_bottom();
    }
}

/// A line read from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    Open,
    Close,
    Quit,
    Say(String),
}

impl TerminalCommand {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "/open" => Self::Open,
            "/close" => Self::Close,
            "/quit" | "/exit" => Self::Quit,
            _ => Self::Say(line.to_string()),
        }
    }
}

/// Run the interactive chat against `endpoint` until `/quit` or end of input.
pub async fn run(endpoint: &str) -> anyhow::Result<()> {
    let client = HttpChatClient::new(endpoint)?;
    info!(name: "terminal.started", endpoint = %client.endpoint(), "Terminal chat started");

    let controller = ChatController::new(TerminalView::new(std::io::stdout()), client);
    controller.open();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match TerminalCommand::parse(&line) {
            TerminalCommand::Open => controller.open(),
            TerminalCommand::Close => controller.close(),
            TerminalCommand::Quit => break,
            TerminalCommand::Say(text) => {
                if !controller.view().state().panel().is_visible() {
                    controller
                        .view()
                        .print("[chat is closed: type /open first]");
                    continue;
                }
                controller.view().state().set_input(text);
                controller.submit_input().await;
            }
        }
    }

    info!(name: "terminal.stopped", "Terminal chat stopped");
    Ok(())
}
