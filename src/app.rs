// src/app.rs
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use eframe::egui;

use crate::api::ApiClient;
use crate::config::ApiConfig;
use crate::state::{AppState, PendingRequest, RequestOutcome};

// Label / backend method id pairs for the analysis menu.
const ANALYSIS_METHODS: &[(&str, &str)] = &[("Isolation Forest", "isolation_forest")];

pub struct DashboardApp {
    state: AppState,
    client: ApiClient,
}

impl DashboardApp {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            state: AppState::new(),
            client: ApiClient::new(config),
        }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            if ui.button("Load Data").clicked() {
                self.spawn_load();
            }

            ui.menu_button("Analyze", |ui| {
                for (label, method) in ANALYSIS_METHODS {
                    if ui.button(*label).clicked() {
                        self.spawn_analyze(method);
                        ui.close_menu();
                    }
                }
            });
        });
    }

    fn spawn_load(&mut self) {
        let token = self.state.begin_load();
        let client = self.client.clone();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let _ = tx.send(RequestOutcome::Load(client.load_data()));
        });

        self.state.track(PendingRequest { token, rx });
        log::debug!("issued load_data request (token {})", token);
    }

    fn spawn_analyze(&mut self, method: &str) {
        let Some(token) = self.state.begin_analyze(method) else {
            return;
        };
        let client = self.client.clone();
        let method = method.to_string();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let _ = tx.send(RequestOutcome::Analyze(client.analyze(&method)));
        });

        self.state.track(PendingRequest { token, rx });
        log::debug!("issued analyze request (token {})", token);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui);
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.label(&self.state.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            match &self.state.chart {
                Some(chart) => chart.show(ui),
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label("Use Load Data to fetch log entries from the backend.");
                    });
                }
            }
        });

        // Blocking warning modal (analyze pressed with no data loaded)
        let warning = self.state.warning.clone();
        if let Some(warning) = warning {
            egui::Window::new("Warning")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&warning);
                    if ui.button("OK").clicked() {
                        self.state.warning = None;
                    }
                });
        }

        // Keep polling while requests are in flight, even without input.
        if self.state.pending_count() > 0 {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
