// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::Message;
use crate::media::ImageData;
use iced::{
    alignment,
    widget::{button, Column, Container, Image, Row, Text},
    ContentFit, Element, Length,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub image: Option<&'a ImageData>,
    pub error: Option<&'a str>,
    pub loading: bool,
    pub has_source: bool,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let label = if ctx.loading { "Loading…" } else { "Resize" };
    let resize_button = button(Text::new(label))
        .on_press_maybe((ctx.has_source && !ctx.loading).then_some(Message::ResizePressed));

    let mut toolbar = Row::new()
        .spacing(12)
        .padding(8)
        .align_y(alignment::Vertical::Center)
        .push(resize_button);
    if let Some(error) = ctx.error {
        toolbar = toolbar.push(Text::new(error));
    } else if !ctx.has_source {
        toolbar = toolbar.push(Text::new("No image configured"));
    }

    let body: Element<'_, Message> = match ctx.image {
        Some(image) => Image::new(image.handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Fill)
            .into(),
        None => Container::new(Text::new("Press Resize to load the image"))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into(),
    };

    Column::new()
        .push(toolbar)
        .push(
            Container::new(body)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
