// MeetDesk - notification queue demo
// Main entry point for iced application

use std::sync::Arc;

use iced::futures::SinkExt;
use iced::widget::{button, column, container, row, text, text_input};
use iced::{Application, Command, Element, Length, Settings as IcedSettings, Theme};
use log::{error, info, warn};
use tokio_util::sync::CancellationToken;

use meetdesk::command_handlers::CommandHandlers;
use meetdesk::config::{validate_config, NotificationConfig};
use meetdesk::messages::{forward_active_changes, Message};
use meetdesk::models::Toast;
use meetdesk::notifications::{render_to_channel, NotificationService};
use meetdesk::ui::notification_area;
use meetdesk::ui::styles::{
    BackgroundStyle, PrimaryButtonStyle, QuietButtonStyle, ZEN_ACCENT, ZEN_SUBTEXT,
};
use meetdesk::ui_state::UiState;
use meetdesk::utils::logging::{init_logging, log_error_with_context};
use meetdesk::AppState;

pub struct Flags {
    pub config: NotificationConfig,
    pub startup_error: Option<String>,
}

pub struct MeetDeskApp {
    config: NotificationConfig,
    shutdown: CancellationToken,
    handlers: Option<CommandHandlers>,
    ui_state: UiState,
    startup_error: Option<String>,
}

impl Application for MeetDeskApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = Flags;

    fn new(flags: Self::Flags) -> (Self, Command<Message>) {
        let app = MeetDeskApp {
            config: flags.config,
            shutdown: CancellationToken::new(),
            handlers: None,
            ui_state: UiState::new(),
            startup_error: flags.startup_error,
        };
        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("MeetDesk")
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::SessionStarted(notifications) => {
                info!("Notification session {} ready", notifications.session_id());
                let state = AppState {
                    notifications,
                    config: Arc::new(self.config.clone()),
                    shutdown: self.shutdown.clone(),
                };
                let handlers = CommandHandlers::new(&state);

                if let Some(err) = self.startup_error.take() {
                    handlers
                        .notifications()
                        .enqueue(Toast::warning(err).with_title("Using default settings"));
                }

                self.handlers = Some(handlers);
                self.ui_state.status = "Ready".to_string();
                Command::none()
            }
            Message::ActiveChanged(active) => {
                self.ui_state.active = active;
                Command::none()
            }
            Message::Notification(message) => {
                if let Some(handlers) = &self.handlers {
                    handlers.notifications().send(message);
                }
                Command::none()
            }
            Message::TitleChanged(title) => {
                self.ui_state.meeting_title = title;
                Command::none()
            }
            Message::CreateMeeting => {
                let Some(handlers) = self.handlers.clone() else {
                    return Command::none();
                };
                let title = self.ui_state.meeting_title.clone();
                self.ui_state.status = "Creating meeting…".to_string();
                Command::perform(
                    async move {
                        handlers
                            .create_meeting(&title)
                            .await
                            .map_err(|e| e.to_safe_string())
                    },
                    Message::OperationFinished,
                )
            }
            Message::SubmitRequest => {
                if let Some(handlers) = &self.handlers {
                    if let Err(e) = handlers.submit_request(&self.ui_state.meeting_title) {
                        handlers.report_failure(&e);
                    }
                }
                Command::none()
            }
            Message::DeleteMeeting => {
                if let Some(handlers) = &self.handlers {
                    if let Err(e) = handlers.delete_meeting(&self.ui_state.meeting_title) {
                        handlers.report_failure(&e);
                    }
                }
                Command::none()
            }
            Message::ShowTip => {
                if let Some(handlers) = &self.handlers {
                    handlers.notifications().enqueue(
                        Toast::info("Notifications show one at a time, in order").with_title("Tip"),
                    );
                }
                Command::none()
            }
            Message::OperationFinished(result) => {
                self.ui_state.status = match result {
                    Ok(()) => "Ready".to_string(),
                    Err(e) => {
                        warn!("Operation failed: {}", e);
                        e
                    }
                };
                Command::none()
            }
        }
    }

    fn subscription(&self) -> iced::Subscription<Message> {
        struct NotificationSession;

        let config = self.config.clone();
        let shutdown = self.shutdown.clone();

        iced::subscription::channel(
            std::any::TypeId::of::<NotificationSession>(),
            100,
            move |mut output| async move {
                let (renderer, updates) = render_to_channel();
                let (service, notifications) =
                    NotificationService::new(&config, renderer, shutdown);

                let _ = output.send(Message::SessionStarted(notifications)).await;
                tokio::spawn(service.run());

                // Ends when the queue is dropped at session end
                forward_active_changes(updates, output).await;

                // Session over, keep the subscription alive without output
                loop {
                    std::future::pending::<()>().await;
                }
            },
        )
    }

    fn view(&self) -> Element<'_, Message> {
        let title_input = text_input("Meeting or request title", &self.ui_state.meeting_title)
            .on_input(Message::TitleChanged)
            .padding(10);

        let actions = row![
            button(text("Create meeting").size(14))
                .on_press(Message::CreateMeeting)
                .style(iced::theme::Button::Custom(Box::new(PrimaryButtonStyle)))
                .padding([8, 16]),
            button(text("Submit request").size(14))
                .on_press(Message::SubmitRequest)
                .style(iced::theme::Button::Custom(Box::new(QuietButtonStyle)))
                .padding([8, 16]),
            button(text("Delete meeting").size(14))
                .on_press(Message::DeleteMeeting)
                .style(iced::theme::Button::Destructive)
                .padding([8, 16]),
            button(text("Tip").size(14))
                .on_press(Message::ShowTip)
                .style(iced::theme::Button::Text),
        ]
        .spacing(10);

        let content = column![
            text("MeetDesk")
                .size(24)
                .style(iced::theme::Text::Color(ZEN_ACCENT)),
            title_input,
            actions,
            text(&self.ui_state.status).size(12).style(ZEN_SUBTEXT),
            iced::widget::vertical_space(),
            notification_area(self.ui_state.active.as_ref()).map(Message::Notification),
        ]
        .spacing(16)
        .padding(24);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(BackgroundStyle)))
            .into()
    }
}

impl Drop for MeetDeskApp {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn main() -> iced::Result {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting MeetDesk with iced UI");

    let (config, startup_error) = match NotificationConfig::load() {
        Ok(config) => (config, None),
        Err(e) => {
            let safe = e.to_safe_string();
            log_error_with_context(&anyhow::Error::new(e), "Config");
            (NotificationConfig::default(), Some(safe))
        }
    };

    if let Err(e) = validate_config(&config) {
        error!("Invalid notification configuration: {}", e);
        eprintln!("Invalid notification configuration: {}", e);
        std::process::exit(1);
    }

    let mut settings = IcedSettings::with_flags(Flags {
        config,
        startup_error,
    });
    settings.window.size = iced::Size::new(640.0, 520.0);
    settings.window.resizable = true;

    MeetDeskApp::run(settings)
}
