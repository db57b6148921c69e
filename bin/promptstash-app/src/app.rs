//! The egui application shell.
//!
//! All behaviour lives in promptstash-client: the [`worker`] loop does the
//! I/O and [`ClientState`] folds its events into a view-model.  This module
//! only renders that view-model and translates clicks into commands, so it
//! stays thin and the logic stays unit-tested.

use std::time::Duration;

use promptstash_client::state::{ClientState, Connectivity, ListState};
use promptstash_client::worker::{self, AppCommand, AppEvent, WorkerHandle};
use promptstash_client::ApiClient;
use tracing::warn;

/// Baseline repaint cadence; keeps the connectivity dot fresh while events
/// arrive on a channel instead of through user input.
const REPAINT_INTERVAL: Duration = Duration::from_millis(250);

pub struct PromptstashApp {
    state: ClientState,
    draft: String,
    /// Prompt id awaiting delete confirmation, if any.
    confirm_delete: Option<i64>,
    worker: WorkerHandle,
    // Declared after `worker` so the command channel closes before the
    // runtime shuts down, letting the worker loop exit cleanly.
    _runtime: tokio::runtime::Runtime,
}

impl PromptstashApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        // Both the HTTP client and the worker tasks need the runtime context.
        let worker = {
            let _guard = runtime.enter();
            let api = ApiClient::from_env()?;
            worker::spawn(api, worker::poll_interval_from_env())
        };

        Ok(Self {
            state: ClientState::new(),
            draft: String::new(),
            confirm_delete: None,
            worker,
            _runtime: runtime,
        })
    }

    fn send(&self, command: AppCommand) {
        if self.worker.commands.send(command).is_err() {
            warn!("worker is gone; dropping command");
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.worker.events.try_recv() {
            // Clear the draft once the text it held is confirmed saved.
            // Edits made while the request was in flight survive, and a
            // failed save leaves the input intact for another try.
            if let AppEvent::Created { prompt } = &event {
                if self.draft == prompt.content {
                    self.draft.clear();
                }
            }
            self.state.apply(event);
        }
    }

    // ── Panels ────────────────────────────────────────────────────────────────

    fn header(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Prompt Save");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let (color, label) = match self.state.connectivity {
                    Connectivity::Unknown => (egui::Color32::GRAY, "Checking DB..."),
                    Connectivity::Connected => (egui::Color32::GREEN, "DB Connected"),
                    Connectivity::Disconnected => (egui::Color32::RED, "DB Disconnected"),
                };
                ui.label(label);
                ui.colored_label(color, "●");
            });
        });
    }

    fn submit_form(&mut self, ui: &mut egui::Ui) {
        ui.add(
            egui::TextEdit::multiline(&mut self.draft)
                .hint_text("Enter your new prompt here...")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );

        let can_submit = self.state.can_submit(&self.draft);
        if ui
            .add_enabled(can_submit, egui::Button::new("Save Prompt"))
            .clicked()
        {
            self.send(AppCommand::Create {
                content: self.draft.clone(),
            });
        }
    }

    fn prompt_list(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Saved Prompts");

        // Clicks are collected here and applied after the match so the list
        // borrow has ended by the time the state changes.
        let mut copy_request: Option<(i64, String)> = None;
        let mut delete_request: Option<i64> = None;

        match &self.state.list {
            ListState::Loading => {
                ui.label("Loading prompts...");
            }
            // The error banner above already explains the failure.
            ListState::Failed => {}
            ListState::Loaded(prompts) if prompts.is_empty() => {
                ui.vertical_centered(|ui| {
                    ui.label("No prompts saved yet.");
                    ui.label("Add one above to get started!");
                });
            }
            ListState::Loaded(prompts) => {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        for prompt in prompts {
                            ui.horizontal(|ui| {
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.button("Delete").clicked() {
                                            delete_request = Some(prompt.id);
                                        }
                                        let copy_label = if self.state.is_copied(prompt.id) {
                                            "Copied!"
                                        } else {
                                            "Copy"
                                        };
                                        if ui.button(copy_label).clicked() {
                                            copy_request =
                                                Some((prompt.id, prompt.content.clone()));
                                        }
                                        ui.with_layout(
                                            egui::Layout::left_to_right(egui::Align::Center),
                                            |ui| {
                                                ui.add(egui::Label::new(&prompt.content).wrap());
                                            },
                                        );
                                    },
                                );
                            });
                            ui.separator();
                        }
                    });
            }
        }

        if let Some((id, content)) = copy_request {
            ctx.copy_text(content);
            self.state.mark_copied(id);
        }
        if let Some(id) = delete_request {
            self.confirm_delete = Some(id);
        }
    }

    fn confirm_dialog(&mut self, ctx: &egui::Context) {
        let Some(id) = self.confirm_delete else {
            return;
        };

        egui::Window::new("Delete prompt")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Are you sure you want to delete this prompt?");
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        self.send(AppCommand::Delete { id });
                        self.confirm_delete = None;
                    }
                    if ui.button("Cancel").clicked() {
                        self.confirm_delete = None;
                    }
                });
            });
    }
}

impl eframe::App for PromptstashApp {
    // Required by eframe 0.34; all rendering happens in `update`, which the
    // runner still invokes immediately before this each frame.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        let copied_remaining = self.state.tick_copied();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.header(ui);
            ui.separator();
            self.submit_form(ui);
            if let Some(error) = &self.state.error {
                ui.colored_label(egui::Color32::RED, error);
            }
            ui.separator();
            self.prompt_list(ui, ctx);
        });

        self.confirm_dialog(ctx);

        // Wake up again for the next poll result, or sooner if a "Copied!"
        // badge is due to expire.
        let mut delay = REPAINT_INTERVAL;
        if let Some(remaining) = copied_remaining {
            delay = delay.min(remaining);
        }
        ctx.request_repaint_after(delay);
    }
}
