use std::{collections::HashMap, collections::VecDeque, sync::Arc};

use chrono::{DateTime, Local};
use client_core::{CachePolicy, Connectivity, FetchSequencer, MenuModel};
use crossbeam_channel::{Receiver, Sender};
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::media::RowImage;
use crate::ui::prompt::{resolve_choice, Prompt, PromptChoice};
use crate::ui::rows::{Rebind, RowSlots, RowVariant};
use crate::ui::view::{layout_rows, ItemRow, MenuRow, RowAction, NO_ITEMS_MESSAGE};

const ONLINE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x3c, 0xa5, 0x4a);
const OFFLINE_COLOR: egui::Color32 = egui::Color32::from_rgb(0xa0, 0xa0, 0xa0);

enum RowImageState {
    Loading,
    Ready(egui::TextureHandle),
    Failed,
}

pub struct StorefrontApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    base_url: Url,
    connectivity: Arc<dyn Connectivity>,
    model: MenuModel,
    fetches: FetchSequencer,
    loading: bool,
    status: String,
    last_updated: Option<DateTime<Local>>,
    prompts: VecDeque<Prompt>,
    images: HashMap<Url, RowImageState>,
    row_slots: RowSlots,
}

impl StorefrontApp {
    /// Builds the app and queues the initial menu load.
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        base_url: Url,
        connectivity: Arc<dyn Connectivity>,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            base_url,
            connectivity,
            model: MenuModel::new(),
            fetches: FetchSequencer::new(),
            loading: false,
            status: "Loading menu...".to_string(),
            last_updated: None,
            prompts: VecDeque::new(),
            images: HashMap::new(),
            row_slots: RowSlots::default(),
        };
        app.request_menu(CachePolicy::ReturnCacheElseLoad);
        app
    }

    fn request_menu(&mut self, policy: CachePolicy) {
        let ticket = self.fetches.begin();
        if dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::LoadMenu { ticket, policy },
            &mut self.status,
        ) {
            self.loading = true;
        }
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::warn!(
                        category = ?err.category(),
                        context = ?err.context(),
                        "backend error: {}",
                        err.message()
                    );
                    self.status = format!("{}: {}", err.title(), err.message());
                    self.prompts.push_back(Prompt::from_error(&err));
                }
                UiEvent::MenuLoaded { ticket, items } => {
                    if !self.fetches.accept(ticket) {
                        tracing::debug!(ticket = ticket.sequence(), "dropping stale menu result");
                        continue;
                    }
                    self.loading = false;
                    self.model.apply(items);
                    self.last_updated = Some(Local::now());
                    self.status = format!("Menu updated: {} items", self.model.count());
                    self.release_stale_slots();
                    self.retry_failed_images();
                }
                UiEvent::MenuFailed { ticket, error } => {
                    if !self.fetches.accept(ticket) {
                        tracing::debug!(ticket = ticket.sequence(), "dropping stale menu failure");
                        continue;
                    }
                    self.loading = false;
                    self.status = format!("Menu update failed: {}", error.message());
                    self.prompts.push_back(Prompt::from_error(&error));
                }
                UiEvent::PurchaseCompleted { name } => {
                    self.status = format!("Ordered {name}");
                    self.prompts.push_back(Prompt::order_placed());
                }
                UiEvent::PurchaseFailed { name, error } => {
                    self.status = format!("Order for {name} failed");
                    self.prompts.push_back(Prompt::from_error(&error));
                }
                UiEvent::ImageLoaded { url, image } => {
                    let texture = upload_row_image(ctx, &url, &image);
                    self.images.insert(url, RowImageState::Ready(texture));
                }
                UiEvent::ImageFailed { url } => {
                    self.images.insert(url, RowImageState::Failed);
                }
                UiEvent::ReachabilityChanged(reachable) => {
                    self.status = if reachable {
                        "Connected to the menu service".to_string()
                    } else {
                        "Menu service unreachable; purchases are disabled".to_string()
                    };
                    ctx.request_repaint();
                }
            }
        }
    }

    fn release_stale_slots(&mut self) {
        for slot in self.row_slots.slots_from(self.model.count()) {
            self.release_slot(slot);
        }
    }

    fn release_slot(&mut self, slot: usize) {
        if let Some(rebind) = RowVariant::prepare_for_reuse(&mut self.row_slots, slot) {
            self.settle_rebind(slot, rebind);
        }
    }

    fn retry_failed_images(&mut self) {
        let failed: Vec<Url> = self
            .images
            .iter()
            .filter(|(_, state)| matches!(state, RowImageState::Failed))
            .map(|(url, _)| url.clone())
            .collect();
        for url in failed {
            self.images.remove(&url);
            self.row_slots.forget_url(&url);
        }
    }

    fn bind_row_image(&mut self, row: &ItemRow) {
        let Some(url) = row.image_url.as_ref() else {
            self.release_slot(row.index);
            return;
        };
        let needs_load = !self.images.contains_key(url);
        let Some(rebind) = self.row_slots.bind(row.index, url, needs_load) else {
            return;
        };

        tracing::trace!(slot = row.index, item_id = row.item_id.0, %url, "binding row image");
        self.settle_rebind(row.index, rebind);
    }

    fn settle_rebind(&mut self, slot: usize, rebind: Rebind) {
        if let Some(previous) = rebind.previous {
            // The slot's pending load is about to be cancelled; whoever shows
            // that URL next has to request it again.
            if matches!(self.images.get(&previous), Some(RowImageState::Loading)) {
                self.images.remove(&previous);
                self.row_slots.forget_url(&previous);
            }
        }

        let Some(cmd) = rebind.command else {
            return;
        };
        let starts_load = match &cmd {
            BackendCommand::LoadImage { url, .. } => Some(url.clone()),
            _ => None,
        };
        let sent = dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
        if let Some(url) = starts_load {
            if sent {
                self.images.insert(url, RowImageState::Loading);
            } else {
                self.row_slots.release(slot);
            }
        }
    }

    fn row_texture(&self, row: &ItemRow) -> Option<&egui::TextureHandle> {
        match row.image_url.as_ref().and_then(|url| self.images.get(url)) {
            Some(RowImageState::Ready(texture)) => Some(texture),
            _ => None,
        }
    }

    fn show_toolbar(&mut self, ctx: &egui::Context) {
        let reachable = self.connectivity.is_reachable();
        egui::TopBottomPanel::top("storefront_toolbar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let (color, label) = if reachable {
                        (ONLINE_COLOR, "● Online")
                    } else {
                        (OFFLINE_COLOR, "● Offline")
                    };
                    ui.label(egui::RichText::new(label).color(color).strong());
                    ui.separator();

                    if ui
                        .add_enabled(!self.loading, egui::Button::new("Refresh"))
                        .clicked()
                    {
                        self.request_menu(CachePolicy::ReloadIgnoringCache);
                    }
                    if self.loading {
                        ui.spinner();
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let updated = match self.last_updated {
                            Some(at) => format!("Updated {}", at.format("%H:%M:%S")),
                            None => "Not updated yet".to_string(),
                        };
                        ui.label(egui::RichText::new(updated).weak());
                    });
                });
            });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("storefront_status")
            .resizable(false)
            .show(ctx, |ui| {
                ui.small(&self.status);
            });
    }

    fn render_menu(&mut self, ctx: &egui::Context) {
        let rows = layout_rows(
            self.model.items(),
            &self.base_url,
            self.connectivity.is_reachable(),
        );
        let mut actions = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for row in &rows {
                        match row {
                            MenuRow::NoItems => {
                                let (rect, _) = ui.allocate_exact_size(
                                    egui::vec2(ui.available_width(), 96.0),
                                    egui::Sense::hover(),
                                );
                                ui.painter().text(
                                    rect.center(),
                                    egui::Align2::CENTER_CENTER,
                                    NO_ITEMS_MESSAGE,
                                    egui::FontId::proportional(18.0),
                                    ui.visuals().weak_text_color(),
                                );
                            }
                            MenuRow::Item(row) => {
                                let variant = RowVariant::for_row(row);
                                let (rect, response) = ui.allocate_exact_size(
                                    egui::vec2(ui.available_width(), variant.height()),
                                    egui::Sense::click(),
                                );
                                if !ui.is_rect_visible(rect) {
                                    continue;
                                }
                                self.bind_row_image(row);
                                let texture = self.row_texture(row);
                                if let Some(action) =
                                    variant.paint(ui, rect, &response, row, texture)
                                {
                                    actions.push(action);
                                }
                            }
                        }
                    }
                });
        });

        for action in actions {
            self.handle_row_action(action);
        }
    }

    fn handle_row_action(&mut self, action: RowAction) {
        let index = match action {
            RowAction::ShowNotes(index) | RowAction::ConfirmPurchase(index) => index,
        };
        let item = match self.model.item_at(index) {
            Ok(item) => item,
            Err(err) => {
                tracing::warn!("row action on a missing item: {err}");
                return;
            }
        };
        let prompt = match action {
            RowAction::ShowNotes(_) => Prompt::notes_for(item),
            RowAction::ConfirmPurchase(_) => Prompt::confirm_purchase(item),
        };
        self.prompts.push_back(prompt);
    }

    fn show_prompt(&mut self, ctx: &egui::Context) {
        let Some(prompt) = self.prompts.front() else {
            return;
        };
        let mut chosen = None;

        egui::Window::new(prompt.title())
            .id(egui::Id::new("storefront_prompt"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                if prompt.is_error() {
                    ui.colored_label(ui.visuals().error_fg_color, prompt.body());
                } else {
                    ui.label(prompt.body());
                }
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    for (label, choice) in prompt.actions() {
                        if ui.button(*label).clicked() {
                            chosen = Some(*choice);
                        }
                    }
                });
            });

        if let Some(choice) = chosen {
            self.answer_prompt(choice);
        }
    }

    fn answer_prompt(&mut self, choice: PromptChoice) {
        let Some(prompt) = self.prompts.pop_front() else {
            return;
        };
        if let Some(cmd) = resolve_choice(&prompt, choice) {
            if let BackendCommand::SubmitPurchase { name, .. } = &cmd {
                self.status = format!("Placing order for {name}...");
            }
            dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
        }
    }
}

fn upload_row_image(ctx: &egui::Context, url: &Url, image: &RowImage) -> egui::TextureHandle {
    let color_image =
        egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba);
    ctx.load_texture(
        format!("row-image:{url}"),
        color_image,
        egui::TextureOptions::LINEAR,
    )
}

impl eframe::App for StorefrontApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events(ctx);

        self.show_toolbar(ctx);
        self.show_status_bar(ctx);
        self.render_menu(ctx);
        self.show_prompt(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
