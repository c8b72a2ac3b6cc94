use crate::transcript::{ChatLine, ChatRole, Transcript};
use crate::webhook_api::{
    ReplyItem, SERVER_ERROR_FALLBACK, WebhookClient, WebhookConfig, reply_lines,
};
use anyhow::{Context as _, Result, anyhow};
use eframe::egui::{self, Align, Button, Color32, Frame, Layout, RichText, ScrollArea, Stroke};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

const APP_TITLE: &str = "МУИС чат туслах";
const WELCOME_TEXT: &str = "Сайн байна уу! Асуултаа бичээд Илгээх товчийг дарна уу.";

const WINDOW_BG: Color32 = Color32::from_rgb(236, 240, 244);
const HEADER_BLUE: Color32 = Color32::from_rgb(0, 76, 151);
const USER_BUBBLE: Color32 = Color32::from_rgb(209, 231, 255);
const BOT_BUBBLE: Color32 = Color32::from_rgb(255, 255, 255);
const BUBBLE_BORDER: Color32 = Color32::from_rgb(199, 205, 214);
const TEXT_COLOR: Color32 = Color32::from_rgb(24, 28, 33);
const LABEL_USER: Color32 = Color32::from_rgb(0, 86, 158);
const LABEL_BOT: Color32 = Color32::from_rgb(96, 104, 114);

/// Нэг илгээлтийн эцсийн үр дүн. Ажилчин thread бүр яг нэг event явуулна.
enum WorkerEvent {
    Replies(Vec<ReplyItem>),
    Failed(String),
}

pub fn run_gui(config: WebhookConfig) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([460.0, 640.0])
            .with_min_inner_size([340.0, 440.0])
            .with_title(APP_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(move |cc| {
            configure_theme(&cc.egui_ctx);
            Ok(Box::new(ChatApp::new(config.clone())))
        }),
    )
    .map_err(|err| anyhow!("failed to start the chat window: {err}"))
}

fn configure_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::light();
    style.visuals.override_text_color = Some(TEXT_COLOR);
    style.visuals.panel_fill = WINDOW_BG;
    style.visuals.extreme_bg_color = Color32::WHITE;
    style.visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BUBBLE_BORDER);
    style.visuals.selection.bg_fill = HEADER_BLUE;
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style
        .text_styles
        .insert(egui::TextStyle::Body, egui::FontId::proportional(15.0));
    style
        .text_styles
        .insert(egui::TextStyle::Button, egui::FontId::proportional(15.0));
    style
        .text_styles
        .insert(egui::TextStyle::Small, egui::FontId::proportional(12.0));
    ctx.set_style(style);
}

/// Нэг бүтэн илгээлт: runtime босгож, клиент үүсгээд хариуг хүлээнэ.
fn run_exchange(config: WebhookConfig, message: &str) -> Result<Vec<ReplyItem>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build the async runtime")?;
    let client = WebhookClient::new(config)?;
    runtime.block_on(client.send_message(message))
}

pub struct ChatApp {
    config: WebhookConfig,
    input: String,
    status: String,
    in_flight: usize,
    transcript: Transcript,
    worker_tx: Sender<WorkerEvent>,
    worker_rx: Receiver<WorkerEvent>,
}

impl ChatApp {
    fn new(config: WebhookConfig) -> Self {
        let (worker_tx, worker_rx) = mpsc::channel();
        let mut transcript = Transcript::new();
        transcript.push(ChatRole::Bot, WELCOME_TEXT);

        Self {
            config,
            input: String::new(),
            status: "Бэлэн".to_string(),
            in_flight: 0,
            transcript,
            worker_tx,
            worker_rx,
        }
    }

    /// Бичсэн зурвасыг илгээнэ. Хоосон оролт дээр юу ч хийхгүй.
    ///
    /// Хэрэглэгчийн мөр тэр дор нь нэмэгдэнэ. Илгээлт бүр өөрийн thread
    /// дээр бие даан явдаг тул өмнөх хариу ирэхээс өмнө дахин илгээж
    /// болно; хариунууд ирсэн дарааллаараа жагсаалтад орно.
    fn send_message(&mut self) {
        let message = self.input.trim().to_string();
        if message.is_empty() {
            return;
        }

        self.transcript.push(ChatRole::User, message.clone());
        self.input.clear();
        self.in_flight += 1;
        self.status = "Илгээж байна...".to_string();

        let config = self.config.clone();
        let tx = self.worker_tx.clone();
        thread::spawn(move || {
            let event = match run_exchange(config, &message) {
                Ok(replies) => WorkerEvent::Replies(replies),
                Err(err) => WorkerEvent::Failed(format!("{err:#}")),
            };
            let _ = tx.send(event);
        });
    }

    fn drain_worker_events(&mut self) {
        loop {
            match self.worker_rx.try_recv() {
                Ok(event) => self.apply_event(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn apply_event(&mut self, event: WorkerEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match event {
            WorkerEvent::Replies(replies) => {
                for line in reply_lines(&replies) {
                    self.transcript.push(ChatRole::Bot, line);
                }
                if self.in_flight == 0 {
                    self.status = "Бэлэн".to_string();
                }
            }
            WorkerEvent::Failed(detail) => {
                log::warn!("webhook exchange failed: {detail}");
                self.transcript.push(ChatRole::Bot, SERVER_ERROR_FALLBACK);
                if self.in_flight == 0 {
                    self.status = "Алдаа гарлаа".to_string();
                }
            }
        }
    }

    fn reset_chat(&mut self) {
        self.transcript.clear();
        self.transcript.push(ChatRole::Bot, WELCOME_TEXT);
        self.status = "Бэлэн".to_string();
    }

    fn render_line(ui: &mut egui::Ui, line: &ChatLine) -> egui::Rect {
        let (label, fill, label_color, is_user) = match line.role {
            ChatRole::User => ("Та", USER_BUBBLE, LABEL_USER, true),
            ChatRole::Bot => ("Туслах", BOT_BUBBLE, LABEL_BOT, false),
        };
        let max_bubble_width = (ui.available_width() * 0.82).clamp(200.0, 640.0);
        let row_layout = if is_user {
            Layout::right_to_left(Align::TOP)
        } else {
            Layout::left_to_right(Align::TOP)
        };

        let mut bubble_rect = egui::Rect::NOTHING;
        ui.horizontal(|ui| {
            ui.set_width(ui.available_width());
            ui.with_layout(row_layout, |ui| {
                bubble_rect = ui
                    .scope(|ui| {
                        ui.set_max_width(max_bubble_width);
                        Frame::default()
                            .fill(fill)
                            .stroke(Stroke::new(1.0, BUBBLE_BORDER))
                            .inner_margin(egui::Margin::same(8))
                            .show(ui, |ui| {
                                ui.label(RichText::new(label).small().strong().color(label_color));
                                ui.add(egui::Label::new(line.text.as_str()).wrap());
                            })
                            .response
                            .rect
                    })
                    .inner;
            });
        });

        bubble_rect
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_worker_events();

        egui::TopBottomPanel::top("header")
            .frame(
                Frame::default()
                    .fill(HEADER_BLUE)
                    .inner_margin(egui::Margin::symmetric(10, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(APP_TITLE).strong().color(Color32::WHITE));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(
                            RichText::new(self.status.as_str())
                                .small()
                                .color(Color32::from_rgb(214, 228, 244)),
                        );
                    });
                });
            });

        egui::TopBottomPanel::bottom("input_bar")
            .resizable(false)
            .frame(
                Frame::default()
                    .fill(WINDOW_BG)
                    .inner_margin(egui::Margin::same(8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let send_width = 90.0;
                    let input_width = (ui.available_width() - send_width - 16.0).max(120.0);
                    let response = ui.add_sized(
                        [input_width, 28.0],
                        egui::TextEdit::singleline(&mut self.input)
                            .hint_text("Зурвасаа энд бичнэ үү..."),
                    );

                    let enter_pressed =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                    if ui
                        .add(
                            Button::new(RichText::new("Илгээх").color(Color32::WHITE))
                                .min_size(egui::vec2(send_width, 28.0))
                                .fill(HEADER_BLUE),
                        )
                        .clicked()
                        || enter_pressed
                    {
                        self.send_message();
                        response.request_focus();
                    }
                });

                ui.horizontal(|ui| {
                    if ui.button("Шинэ яриа").clicked() {
                        self.reset_chat();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(RichText::new("Enter дарж илгээнэ").small());
                        if self.in_flight > 0 {
                            ui.label(RichText::new("Хариу хүлээж байна...").small().strong());
                        }
                    });
                });
            });

        egui::CentralPanel::default()
            .frame(
                Frame::default()
                    .fill(WINDOW_BG)
                    .inner_margin(egui::Margin::same(10)),
            )
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .id_salt("transcript_scroll")
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for line in self.transcript.lines() {
                            Self::render_line(ui, line);
                            ui.add_space(6.0);
                        }
                    });
            });

        ctx.request_repaint_after(Duration::from_millis(16));
    }
}
