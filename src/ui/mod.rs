// src/ui/mod.rs
//! iced rendering of the active notification.
//!
//! Views emit [`NotificationMessage`]s carrying the item id; the app
//! forwards them to the session through its `NotificationHandle`.

use iced::widget::{button, column, container, progress_bar, row, text};
use iced::{Alignment, Element, Length};

use crate::models::{ConfirmDialog, DestructiveDialog, LoadingDialog, NotificationItem, Toast};
use crate::notifications::NotificationMessage;

pub mod styles;

use styles::{
    kind_color, DestructiveButtonStyle, DialogStyle, PrimaryButtonStyle, QuietButtonStyle,
    ToastStyle, ZEN_SUBTEXT, ZEN_TEXT,
};

/// Bottom area of the window: the active item, or nothing.
pub fn notification_area(active: Option<&NotificationItem>) -> Element<'_, NotificationMessage> {
    match active {
        Some(item) => container(notification_view(item))
            .width(Length::Fill)
            .padding(16)
            .center_x()
            .into(),
        None => container(text("")).height(Length::Shrink).into(),
    }
}

pub fn notification_view(item: &NotificationItem) -> Element<'_, NotificationMessage> {
    match item {
        NotificationItem::Toast(toast) => view_toast(toast),
        NotificationItem::ConfirmDialog(dialog) => view_confirm(dialog),
        NotificationItem::DestructiveDialog(dialog) => view_destructive(dialog),
        NotificationItem::LoadingDialog(dialog) => view_loading(dialog),
    }
}

fn view_toast(toast: &Toast) -> Element<'_, NotificationMessage> {
    let id = toast.id();

    let mut body = column![].spacing(2).width(Length::Fill);
    if let Some(title) = toast.title() {
        body = body.push(text(title).size(14).style(kind_color(toast.kind())));
    }
    body = body.push(text(toast.message()).size(14).style(ZEN_TEXT));

    let mut content = row![body].spacing(10).align_items(Alignment::Center);

    if let Some(label) = toast.action_label() {
        content = content.push(
            button(text(label).size(13))
                .on_press(NotificationMessage::Action(id))
                .style(iced::theme::Button::Custom(Box::new(QuietButtonStyle)))
                .padding([4, 10]),
        );
    }

    if toast.dismissible() {
        content = content.push(
            button(text("×").size(16))
                .on_press(NotificationMessage::Dismiss(id))
                .style(iced::theme::Button::Custom(Box::new(QuietButtonStyle)))
                .padding([2, 8]),
        );
    }

    container(content)
        .width(Length::Fixed(360.0))
        .padding(12)
        .style(iced::theme::Container::Custom(Box::new(ToastStyle(toast.kind()))))
        .into()
}

fn dialog_card<'a>(
    title: Option<&'a str>,
    body: Element<'a, NotificationMessage>,
    buttons: Element<'a, NotificationMessage>,
) -> Element<'a, NotificationMessage> {
    let mut content = column![].spacing(14);
    if let Some(title) = title {
        content = content.push(text(title).size(18).style(ZEN_TEXT));
    }
    content = content.push(body).push(buttons);

    container(content)
        .width(Length::Fixed(400.0))
        .padding(20)
        .style(iced::theme::Container::Custom(Box::new(DialogStyle)))
        .into()
}

fn view_confirm(dialog: &ConfirmDialog) -> Element<'_, NotificationMessage> {
    let id = dialog.id();

    let buttons = row![
        iced::widget::horizontal_space(),
        button(text(dialog.cancel_label()).size(14))
            .on_press(NotificationMessage::Cancel(id))
            .style(iced::theme::Button::Custom(Box::new(QuietButtonStyle)))
            .padding([8, 16]),
        button(text(dialog.confirm_label()).size(14))
            .on_press(NotificationMessage::Confirm(id))
            .style(iced::theme::Button::Custom(Box::new(PrimaryButtonStyle)))
            .padding([8, 16]),
    ]
    .spacing(10)
    .align_items(Alignment::Center);

    dialog_card(
        dialog.title(),
        text(dialog.message())
            .size(14)
            .style(kind_color(dialog.kind()))
            .into(),
        buttons.into(),
    )
}

fn view_destructive(dialog: &DestructiveDialog) -> Element<'_, NotificationMessage> {
    let id = dialog.id();

    let mut body = column![text(dialog.message()).size(14).style(ZEN_TEXT)].spacing(6);
    if let Some(name) = dialog.item_name() {
        body = body.push(text(name).size(16).style(styles::ZEN_DESTRUCTIVE));
    }

    let buttons = row![
        iced::widget::horizontal_space(),
        button(text(dialog.cancel_label()).size(14))
            .on_press(NotificationMessage::Cancel(id))
            .style(iced::theme::Button::Custom(Box::new(QuietButtonStyle)))
            .padding([8, 16]),
        button(text(dialog.confirm_label()).size(14))
            .on_press(NotificationMessage::Confirm(id))
            .style(iced::theme::Button::Custom(Box::new(DestructiveButtonStyle)))
            .padding([8, 16]),
    ]
    .spacing(10)
    .align_items(Alignment::Center);

    dialog_card(dialog.title(), body.into(), buttons.into())
}

fn view_loading(dialog: &LoadingDialog) -> Element<'_, NotificationMessage> {
    let indicator: Element<'_, NotificationMessage> = match dialog.progress() {
        Some(progress) => column![
            progress_bar(0.0..=1.0, progress).height(Length::Fixed(6.0)),
            text(format!("{:.0}%", progress * 100.0))
                .size(12)
                .style(ZEN_SUBTEXT),
        ]
        .spacing(6)
        .into(),
        None => text("Working…").size(12).style(ZEN_SUBTEXT).into(),
    };

    dialog_card(
        None,
        text(dialog.message()).size(14).style(ZEN_TEXT).into(),
        indicator,
    )
}
