use iced::widget::{button, image, scrollable, text};
use iced::{Element, Length};
use iced_aw::Wrap;

use crate::state::AppState;
use crate::Message;

/// Grid of clickable sprite previews; the selected one gets the primary style
pub fn thumbnail_grid(state: &AppState) -> Element<'_, Message> {
    let selection = state.selection();
    let size = state.config().thumbnail_size;

    if selection.thumbnails().is_empty() {
        return text("No sprites in this category.").size(14).into();
    }

    let elements: Vec<Element<'_, Message>> = selection
        .thumbnails()
        .iter()
        .enumerate()
        .map(|(index, thumbnail)| {
            // Handles built from a path are keyed by that path, so rebuilding
            // them on each view doesn't re-decode
            let handle = image::Handle::from_path(state.resolve(&thumbnail.path));
            let style = if selection.highlighted() == Some(index) {
                button::primary
            } else {
                button::secondary
            };

            button(image(handle).width(Length::Fixed(size)).height(Length::Fixed(size)))
                .on_press(Message::ThumbnailClicked(index))
                .padding(4)
                .style(style)
                .into()
        })
        .collect();

    scrollable(Wrap::with_elements(elements).spacing(6.0).line_spacing(6.0))
        .height(Length::Fixed(size * 2.0 + 40.0))
        .width(Length::Fill)
        .into()
}
