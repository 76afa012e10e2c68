//! Row painting and image slot bookkeeping for the menu list.

use std::collections::HashMap;

use egui::{pos2, vec2, Align2, Color32, FontId, Rect, RichText, Stroke};
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::ui::view::{ItemRow, RowAction, RowKind};

const PURCHASE_ENABLED_FILL: Color32 = Color32::from_rgb(0xd0, 0x2b, 0x2b);
const PURCHASE_DISABLED_FILL: Color32 = Color32::from_rgb(0x8a, 0x8a, 0x8a);
const VEGETARIAN_FILL: Color32 = Color32::from_rgb(0x3c, 0xa5, 0x4a);
const PURCHASE_BUTTON_SIZE: egui::Vec2 = egui::Vec2::new(88.0, 32.0);
const ROW_PADDING: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowVariant {
    Standard,
    Promoted,
}

impl RowVariant {
    pub fn for_row(row: &ItemRow) -> Self {
        match row.kind {
            RowKind::Standard => RowVariant::Standard,
            RowKind::Promoted => RowVariant::Promoted,
        }
    }

    pub fn height(self) -> f32 {
        match self {
            RowVariant::Standard => 96.0,
            RowVariant::Promoted => 176.0,
        }
    }

    fn name_font(self) -> FontId {
        match self {
            RowVariant::Standard => FontId::proportional(17.0),
            RowVariant::Promoted => FontId::proportional(24.0),
        }
    }

    /// Standard rows keep a square thumbnail on the left; promoted rows put a
    /// banner across the top.
    fn image_rect(self, rect: Rect) -> Rect {
        let inner = rect.shrink(ROW_PADDING);
        match self {
            RowVariant::Standard => {
                Rect::from_min_size(inner.min, vec2(inner.height(), inner.height()))
            }
            RowVariant::Promoted => {
                Rect::from_min_size(inner.min, vec2(inner.width(), inner.height() - 48.0))
            }
        }
    }

    fn text_band(self, rect: Rect) -> Rect {
        let inner = rect.shrink(ROW_PADDING);
        let image = self.image_rect(rect);
        match self {
            RowVariant::Standard => {
                Rect::from_min_max(pos2(image.right() + 12.0, inner.top()), inner.max)
            }
            RowVariant::Promoted => {
                Rect::from_min_max(pos2(inner.left(), image.bottom() + 4.0), inner.max)
            }
        }
    }

    /// Paints `row` into `rect`. `response` is the click response of the whole
    /// row; the purchase button sits on top of it.
    pub fn paint(
        self,
        ui: &mut egui::Ui,
        rect: Rect,
        response: &egui::Response,
        row: &ItemRow,
        texture: Option<&egui::TextureHandle>,
    ) -> Option<RowAction> {
        let painter = ui.painter_at(rect);
        let visuals = ui.visuals();
        let background = if response.hovered() {
            visuals.widgets.hovered.weak_bg_fill
        } else {
            visuals.faint_bg_color
        };
        let text_color = visuals.strong_text_color();
        let placeholder_fill = visuals.extreme_bg_color;
        let placeholder_text = visuals.weak_text_color();

        painter.rect_filled(rect.shrink(2.0), 6.0, background);

        let image_rect = self.image_rect(rect);
        match texture {
            Some(texture) => {
                painter.image(
                    texture.id(),
                    image_rect,
                    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
            None => {
                painter.rect_filled(image_rect, 4.0, placeholder_fill);
                let glyph_size = match self {
                    RowVariant::Standard => 28.0,
                    RowVariant::Promoted => 56.0,
                };
                painter.text(
                    image_rect.center(),
                    Align2::CENTER_CENTER,
                    "🍔",
                    FontId::proportional(glyph_size),
                    placeholder_text,
                );
            }
        }

        let band = self.text_band(rect);
        let mut name_pos = pos2(band.left(), band.center().y);
        if row.vegetarian_visible {
            let center = pos2(band.left() + 9.0, band.center().y);
            painter.circle(center, 9.0, VEGETARIAN_FILL, Stroke::NONE);
            painter.text(
                center,
                Align2::CENTER_CENTER,
                "V",
                FontId::proportional(11.0),
                Color32::WHITE,
            );
            name_pos.x += 26.0;
        }

        if row.name_shadow() {
            painter.text(
                name_pos + vec2(1.5, 1.5),
                Align2::LEFT_CENTER,
                &row.name,
                self.name_font(),
                Color32::from_black_alpha(170),
            );
        }
        painter.text(
            name_pos,
            Align2::LEFT_CENTER,
            &row.name,
            self.name_font(),
            text_color,
        );

        let button_rect = Rect::from_center_size(
            pos2(
                band.right() - PURCHASE_BUTTON_SIZE.x / 2.0,
                band.center().y,
            ),
            PURCHASE_BUTTON_SIZE,
        );
        let fill = if row.purchase_enabled {
            PURCHASE_ENABLED_FILL
        } else {
            PURCHASE_DISABLED_FILL
        };
        let mut button_ui = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(button_rect)
                .layout(egui::Layout::centered_and_justified(
                    egui::Direction::TopDown,
                )),
        );
        let purchase = button_ui.add_enabled(
            row.purchase_enabled,
            egui::Button::new(RichText::new(&row.price_label).strong().color(Color32::WHITE))
                .fill(fill),
        );

        if purchase.clicked() {
            Some(RowAction::ConfirmPurchase(row.index))
        } else if response.clicked() {
            Some(RowAction::ShowNotes(row.index))
        } else {
            None
        }
    }

    /// Releases `slot` ahead of binding it to another item. The returned
    /// rebind names the URL the slot showed and cancels its load.
    pub fn prepare_for_reuse(slots: &mut RowSlots, slot: usize) -> Option<Rebind> {
        slots.release(slot).map(|previous| Rebind {
            previous: Some(previous),
            command: Some(BackendCommand::CancelImage { slot }),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rebind {
    pub previous: Option<Url>,
    pub command: Option<BackendCommand>,
}

/// Which image URL each visible row slot is currently showing.
#[derive(Debug, Default)]
pub struct RowSlots {
    bound: HashMap<usize, Url>,
}

impl RowSlots {
    /// Binds `slot` to `url`. Returns `None` when the slot already shows `url`.
    ///
    /// `needs_load` is whether no load for `url` exists yet; in that case the
    /// returned command starts one (which also replaces the slot's previous
    /// load). Otherwise a slot that was showing something else gets its load
    /// cancelled.
    pub fn bind(&mut self, slot: usize, url: &Url, needs_load: bool) -> Option<Rebind> {
        if self.bound.get(&slot) == Some(url) {
            return None;
        }
        let previous = self.bound.insert(slot, url.clone());
        let command = if needs_load {
            Some(BackendCommand::LoadImage {
                slot,
                url: url.clone(),
            })
        } else if previous.is_some() {
            Some(BackendCommand::CancelImage { slot })
        } else {
            None
        };
        Some(Rebind { previous, command })
    }

    pub fn release(&mut self, slot: usize) -> Option<Url> {
        self.bound.remove(&slot)
    }

    /// Unbinds every slot showing `url` so the next frame binds them afresh.
    pub fn forget_url(&mut self, url: &Url) {
        self.bound.retain(|_, bound| bound != url);
    }

    /// Slots at or past `count`, i.e. rows that no longer exist.
    pub fn slots_from(&self, count: usize) -> Vec<usize> {
        let mut slots: Vec<usize> = self
            .bound
            .keys()
            .copied()
            .filter(|slot| *slot >= count)
            .collect();
        slots.sort_unstable();
        slots
    }
}
