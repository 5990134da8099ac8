//! Main egui application: composes the panels and drives the controller.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use prd_core::controller::{ChatController, SendOutcome};
use prd_core::event_bus::EventBus;
use prd_platform::HttpTransport;
use prd_types::config::ClientConfig;
use prd_types::error::ApiError;
use prd_types::project::ProjectId;
use prd_types::{ChatError, Result};
use prd_ui::panels::{chat_panel, prd_preview, projects_panel, ChatAction, ProjectAction};
use prd_ui::state::UiState;
use prd_ui::theme;

/// Failures from background tasks, shown on the next frame
type Failures = Rc<RefCell<Vec<ChatError>>>;

pub struct PrdApp {
    ui_state: UiState,
    config: ClientConfig,
    controller: ChatController,
    failures: Failures,
    server_status: Rc<RefCell<Option<String>>>,
    first_frame: bool,
}

impl PrdApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ClientConfig) -> Self {
        let transport = Rc::new(HttpTransport::new(config.clone()));
        let controller = ChatController::new(transport, EventBus::new());

        Self {
            ui_state: UiState::new(config.max_message_chars),
            config,
            controller,
            failures: Rc::new(RefCell::new(Vec::new())),
            server_status: Rc::new(RefCell::new(None)),
            first_frame: true,
        }
    }

    /// Run a controller call in the background. Errors other than
    /// cancellation are queued for the status line.
    fn spawn<F>(&self, ctx: &egui::Context, task: F)
    where
        F: Future<Output = Result<()>> + 'static,
    {
        let failures = self.failures.clone();
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    log::error!("{}", e);
                    failures.borrow_mut().push(e);
                }
            }
            ctx.request_repaint();
        });
    }

    fn startup(&self, ctx: &egui::Context) {
        let controller = self.controller.clone();
        let status = self.server_status.clone();
        self.spawn(ctx, async move {
            let health = controller.check_health().await;
            *status.borrow_mut() = Some(match &health {
                Ok(h) => h.status.clone(),
                Err(_) => "offline".to_string(),
            });
            health?;
            let projects = controller.load_projects().await?;
            if let Some(first) = projects.first() {
                controller.select_project(&first.id);
            }
            Ok(())
        });
    }

    fn dispatch_send(&self, text: String, ctx: &egui::Context) {
        let controller = self.controller.clone();
        self.spawn(ctx, async move {
            match controller.send_message(&text).await {
                Ok(SendOutcome::Ignored(reason)) => log::debug!("Send ignored: {:?}", reason),
                Ok(SendOutcome::Completed { content }) => {
                    log::info!("Response complete ({} bytes)", content.len())
                }
                Ok(SendOutcome::Cancelled { partial }) => {
                    log::info!("Response stopped ({} bytes kept)", partial.len())
                }
                // Already recorded on the conversation and emitted as SendFailed
                Err(e) => log::warn!("Send failed: {}", e),
            }
            Ok(())
        });
    }

    fn dispatch_reset(&self, ctx: &egui::Context) {
        let controller = self.controller.clone();
        self.spawn(ctx, async move { controller.reset_chat().await });
    }

    fn dispatch_refresh(&self, id: ProjectId, ctx: &egui::Context) {
        let controller = self.controller.clone();
        self.spawn(ctx, async move {
            controller.refresh_project(&id).await?;
            Ok(())
        });
    }

    fn handle_project_action(&self, action: ProjectAction, ctx: &egui::Context) {
        let controller = self.controller.clone();
        match action {
            ProjectAction::None => {}
            ProjectAction::Select(id) => {
                controller.select_project(&id);
            }
            ProjectAction::Create(name) => self.spawn(ctx, async move {
                controller.create_project(&name).await?;
                Ok(())
            }),
            ProjectAction::Delete(id) => {
                self.spawn(ctx, async move { controller.delete_project(&id).await })
            }
            ProjectAction::Reload => self.spawn(ctx, async move {
                controller.load_projects().await?;
                Ok(())
            }),
        }
    }

    fn drain(&mut self, ctx: &egui::Context) {
        let events = self.controller.events().drain();
        if !events.is_empty() {
            for id in self.ui_state.process_events(events) {
                self.dispatch_refresh(id, ctx);
            }
            ctx.request_repaint();
        }

        let failures: Vec<ChatError> = self.failures.borrow_mut().drain(..).collect();
        for failure in failures {
            self.ui_state.report_error(ApiError::from(failure));
        }
    }
}

impl eframe::App for PrdApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.startup(ctx);
            self.first_frame = false;
        }

        self.drain(ctx);

        let view = self.controller.view();
        if view.needs_refresh {
            if let Some(id) = view.project.clone() {
                self.controller.acknowledge_refresh(&id);
                self.dispatch_refresh(id, ctx);
            }
        }
        if view.is_streaming || view.is_resetting {
            ctx.request_repaint();
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("PRD Generator").strong().color(theme::ACCENT).size(16.0));
                ui.separator();
                let status = self.server_status.borrow().clone();
                ui.label(
                    RichText::new(format!(
                        "API: {} | {}",
                        self.config.api.resolved_base_url(),
                        status.as_deref().unwrap_or("connecting...")
                    ))
                    .color(theme::TEXT_SECONDARY)
                    .small(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.selectable_label(self.ui_state.show_preview, "PRD").clicked() {
                        self.ui_state.show_preview = !self.ui_state.show_preview;
                    }
                });
            });
        });

        // ── Project sidebar ──────────────────────────────────
        let projects = self.controller.projects();
        let project_action = SidePanel::left("projects_panel")
            .exact_width(theme::SIDEBAR_WIDTH)
            .show(ctx, |ui| {
                projects_panel(ui, &mut self.ui_state, &projects, view.project.as_ref())
            })
            .inner;
        self.handle_project_action(project_action, ctx);

        // ── PRD preview ──────────────────────────────────────
        if self.ui_state.show_preview {
            let active = self.controller.active_project();
            SidePanel::right("prd_preview")
                .min_width(280.0)
                .default_width(360.0)
                .show(ctx, |ui| prd_preview(ui, active.as_ref()));
        }

        // ── Conversation ─────────────────────────────────────
        let chat_action = CentralPanel::default()
            .show(ctx, |ui| chat_panel(ui, &mut self.ui_state, &view))
            .inner;
        match chat_action {
            ChatAction::None => {}
            ChatAction::Send(text) => self.dispatch_send(text, ctx),
            ChatAction::Cancel => {
                if let Some(id) = &view.project {
                    self.controller.cancel(id);
                }
            }
            ChatAction::Reset => self.dispatch_reset(ctx),
        }
    }
}

impl Drop for PrdApp {
    fn drop(&mut self) {
        self.controller.shutdown();
    }
}
