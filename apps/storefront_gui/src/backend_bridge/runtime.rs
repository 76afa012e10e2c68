//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{CachePolicy, ImageScheduler, MenuSource, ReachabilityProbe};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};
use crate::media::decode_row_image;

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    client: Arc<dyn MenuSource>,
    probe: ReachabilityProbe,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorCategory::Unknown,
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let mut reachability = probe.subscribe();
            tokio::spawn(probe.run());
            let reachability_tx = ui_tx.clone();
            tokio::spawn(async move {
                while reachability.changed().await.is_ok() {
                    let reachable = *reachability.borrow_and_update();
                    let _ = reachability_tx.try_send(UiEvent::ReachabilityChanged(reachable));
                }
            });

            let mut images = ImageScheduler::new();
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadMenu { ticket, policy } => {
                        tracing::info!(ticket = ticket.sequence(), ?policy, "backend: load_menu");
                        let client = client.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let result = match policy {
                                CachePolicy::ReturnCacheElseLoad => client.fetch_items().await,
                                CachePolicy::ReloadIgnoringCache => client.refresh_items().await,
                            };
                            let event = match result {
                                Ok(items) => UiEvent::MenuLoaded { ticket, items },
                                Err(err) => {
                                    tracing::error!(
                                        ticket = ticket.sequence(),
                                        "backend: load_menu failed: {err}"
                                    );
                                    UiEvent::MenuFailed {
                                        ticket,
                                        error: UiError::from_fetch(&err),
                                    }
                                }
                            };
                            let _ = ui_tx.try_send(event);
                        });
                    }
                    BackendCommand::SubmitPurchase {
                        item_id,
                        name,
                        price_units,
                    } => {
                        tracing::info!(item_id = item_id.0, price_units, "backend: submit_purchase");
                        let client = client.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let event = match client.submit_purchase(item_id, price_units).await {
                                Ok(()) => UiEvent::PurchaseCompleted { name },
                                Err(err) => {
                                    tracing::error!(
                                        item_id = item_id.0,
                                        "backend: submit_purchase failed: {err}"
                                    );
                                    UiEvent::PurchaseFailed {
                                        name,
                                        error: UiError::from_purchase(&err),
                                    }
                                }
                            };
                            let _ = ui_tx.try_send(event);
                        });
                    }
                    BackendCommand::LoadImage { slot, url } => {
                        let client = client.clone();
                        let ui_tx = ui_tx.clone();
                        let task_url = url.clone();
                        images.schedule(slot, url, async move {
                            let decoded = match client.load_image(&task_url).await {
                                Ok(bytes) => decode_row_image(&task_url, &bytes),
                                Err(err) => Err(err),
                            };
                            let event = match decoded {
                                Ok(image) => UiEvent::ImageLoaded {
                                    url: task_url,
                                    image,
                                },
                                Err(err) => {
                                    tracing::warn!(slot, "backend: image load failed: {err}");
                                    UiEvent::ImageFailed { url: task_url }
                                }
                            };
                            let _ = ui_tx.try_send(event);
                        });
                    }
                    BackendCommand::CancelImage { slot } => {
                        images.cancel(slot);
                    }
                }
            }

            tracing::info!("backend: command channel closed, shutting down");
            images.cancel_all();
        });
    });
}
