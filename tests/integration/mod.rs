mod list_selection;
mod staged;
mod viewport;
