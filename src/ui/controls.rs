use iced::widget::{column, pick_list, row, slider, text, Column, Row};
use iced::{Alignment, Element, Length};

use crate::state::tint::{HUE_MAX, PERCENT_MAX};
use crate::state::AppState;
use crate::Message;

/// Category dropdown, plus the subcategory dropdown when it applies
pub fn category_bar(state: &AppState) -> Row<'_, Message> {
    let manifest = state.manifest();
    let selection = state.selection();

    let categories: Vec<String> = manifest.categories().map(str::to_string).collect();
    let mut bar = row![
        text("Category").size(16),
        pick_list(
            categories,
            Some(selection.category().to_string()).filter(|category| !category.is_empty()),
            Message::CategorySelected,
        ),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    if selection.subcategory_visible(manifest) {
        let subcategories: Vec<String> = manifest
            .subcategories(selection.category())
            .into_iter()
            .map(str::to_string)
            .collect();
        bar = bar.push(pick_list(
            subcategories,
            selection.active_subcategory(manifest).map(str::to_string),
            Message::SubcategorySelected,
        ));
    }

    bar
}

/// "Category / Subcategory" readout above the thumbnails, plus the chosen file
pub fn status_line(state: &AppState) -> Row<'_, Message> {
    let selection = state.selection();
    let status = selection.status();
    row![
        text("Selected:").size(14),
        text(&status.category).size(14),
        text(&status.subcategory).size(14),
        text(selection.file().unwrap_or("")).size(14),
    ]
    .spacing(8)
}

/// Hue/saturation/value sliders with their numeric readouts
pub fn tint_sliders(state: &AppState) -> Column<'_, Message> {
    let tint = state.tint();
    let readouts = state.readouts();

    column![
        labelled("Hue", slider(0..=HUE_MAX, tint.hue, Message::HueChanged), &readouts.hue),
        labelled(
            "Saturation",
            slider(0..=PERCENT_MAX, tint.saturation, Message::SaturationChanged),
            &readouts.saturation,
        ),
        labelled(
            "Value",
            slider(0..=PERCENT_MAX, tint.value, Message::ValueChanged),
            &readouts.value,
        ),
    ]
    .spacing(12)
    .width(Length::Fixed(280.0))
}

fn labelled<'a>(
    label: &'a str,
    control: impl Into<Element<'a, Message>>,
    readout: &'a str,
) -> Row<'a, Message> {
    let control: Element<'a, Message> = control.into();
    row![
        text(label).width(Length::Fixed(80.0)),
        control,
        text(readout).width(Length::Fixed(36.0)),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
}
