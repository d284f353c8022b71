//! Interactive terminal picker.
//!
//! Drives a [`StagedSelection`] from key presses. Keys stand in for pointer
//! clicks: Enter is a plain click, Space a toggle-modifier click and `v` a
//! shift-click, so the picker behaves like a page filter menu in a browser.

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::{debug, info};

use crate::modifiers::{Modifier, Platform};
use crate::options::OptionList;
use crate::staged::{SectionToggle, SelectionHost, StagedSelection};
use crate::viewport::{self, Align, RowMeasurements};

/// Format a number in a human-readable way (e.g., 1.2K, 3.5M).
pub fn humanize_count(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Result of an interactive pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickResult {
    /// The committed value when the picker closed.
    pub value: Vec<String>,
    /// Whether the user aborted.
    pub cancelled: bool,
}

/// Settings for one picker session.
#[derive(Debug, Clone)]
pub struct PickSettings {
    /// Prompt text shown at the top.
    pub prompt: String,
    pub value: Vec<String>,
    pub default_value: Vec<String>,
    pub multiple: bool,
    pub max_selected: Option<usize>,
    pub platform: Platform,
    /// Rows shown at once.
    pub page_size: usize,
}

impl Default for PickSettings {
    fn default() -> Self {
        Self {
            prompt: "Select values".to_string(),
            value: Vec::new(),
            default_value: Vec::new(),
            multiple: true,
            max_selected: None,
            platform: Platform::current(),
            page_size: crate::config::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Host side of the picker: persists commits as soon as they are proposed.
#[derive(Debug, Default)]
struct PickerHost {
    /// Value proposed by the last commit, not yet synced back.
    pending: Option<Vec<String>>,
    /// Whether the last commit came from a plain click.
    replaced: bool,
}

impl SelectionHost<String> for PickerHost {
    fn on_change(&mut self, value: &[String]) {
        info!("selection changed: {}", value.join(", "));
        self.pending = Some(value.to_vec());
    }

    fn on_toggle(&mut self, value: &[String]) {
        debug!("staged: {}", value.join(", "));
    }

    fn on_replace(&mut self, value: &String) {
        debug!("replaced selection with {value}");
        self.replaced = true;
    }

    fn on_reset(&mut self) {
        info!("selection reset to default");
    }

    fn on_section_toggle(&mut self, section: &str, action: SectionToggle) {
        debug!("section {section}: {action:?}");
    }
}

/// Input mode for the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Normal selection mode.
    Selection,
    /// Search/filter mode.
    Search,
}

/// Actions that can result from key handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PickerAction {
    Continue,
    Done,
    Cancel,
    EnterSearch,
}

/// Internal state for the picker UI.
struct PickerState {
    selection: StagedSelection<String, PickerHost>,
    mode: Mode,
    /// Current cursor position in the visible option list.
    cursor: usize,
    /// Scroll offset of the option list, in rows.
    scroll_offset: usize,
    page_size: usize,
}

impl PickerState {
    fn new(options: OptionList<String>, settings: &PickSettings) -> Self {
        let mut selection = StagedSelection::new(options, PickerHost::default())
            .with_value(settings.value.clone())
            .with_default_value(settings.default_value.clone())
            .multiple(settings.multiple)
            .with_max_selected(settings.max_selected)
            .with_platform(settings.platform);
        selection.open_menu();

        Self {
            selection,
            mode: Mode::Selection,
            cursor: 0,
            scroll_offset: 0,
            page_size: settings.page_size.max(1),
        }
    }

    fn visible_values(&self) -> Vec<String> {
        self.selection.visible_values()
    }

    fn current_option(&self) -> Option<String> {
        self.visible_values().get(self.cursor).cloned()
    }

    /// Apply a commit proposed to the host, as a host persisting it would.
    ///
    /// Returns `true` if the commit came from a plain click.
    fn sync_commit(&mut self) -> bool {
        let host = self.selection.host_mut();
        let replaced = std::mem::take(&mut host.replaced);
        if let Some(value) = host.pending.take() {
            self.selection.set_value(value);
        }
        replaced
    }

    /// Click the option under the cursor with `modifier` held.
    fn click_current(&mut self, modifier: Option<Modifier>) {
        let Some(value) = self.current_option() else {
            return;
        };
        if let Some(modifier) = modifier {
            self.selection.modifiers_mut().press(modifier);
        }
        self.selection.click(&value);
        if let Some(modifier) = modifier {
            self.selection.modifiers_mut().release(modifier);
        }
    }

    fn toggle_current_section(&mut self) {
        let Some(value) = self.current_option() else {
            return;
        };
        if let Some(key) = self.selection.options().section_of(&value).map(str::to_string) {
            self.selection.toggle_section(&key);
        }
    }

    fn set_search(&mut self, query: &str) {
        self.selection.handle_search(query);
        self.clamp_cursor();
    }

    fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.adjust_scroll();
        }
    }

    fn cursor_down(&mut self) {
        let visible_count = self.visible_values().len();
        if self.cursor + 1 < visible_count {
            self.cursor += 1;
            self.adjust_scroll();
        }
    }

    /// Clamp cursor to valid range after filter changes.
    fn clamp_cursor(&mut self) {
        let visible_count = self.visible_values().len();
        if visible_count == 0 {
            self.cursor = 0;
        } else if self.cursor >= visible_count {
            self.cursor = visible_count - 1;
        }
        self.adjust_scroll();
    }

    fn rows(&self) -> RowMeasurements {
        RowMeasurements::new(self.visible_values().len(), 1.0)
    }

    fn window(&self) -> Option<(usize, usize)> {
        self.rows()
            .visible_range(self.scroll_offset as f64, self.page_size as f64)
    }

    /// Adjust scroll offset to keep cursor visible.
    fn adjust_scroll(&mut self) {
        let rows = self.rows().rows();
        let height = self.page_size as f64;
        let align = match viewport::visible_range(self.scroll_offset as f64, height, &rows) {
            Some((first, last)) if (first..=last).contains(&self.cursor) => return,
            Some((first, _)) if self.cursor < first => Align::Start,
            Some(_) => Align::End,
            None => Align::Start,
        };
        self.scroll_offset =
            viewport::scroll_offset_for(self.cursor, &rows, height, align).round() as usize;
    }

    /// Indices of selected rows in the visible list.
    fn selected_rows(&self) -> Vec<usize> {
        self.visible_values()
            .iter()
            .enumerate()
            .filter(|(_, v)| self.selection.is_selected(v))
            .map(|(i, _)| i)
            .collect()
    }

    /// Move the cursor to the next selected row below the visible page.
    fn jump_next_selected(&mut self) {
        if let Some(row) = viewport::next_highlighted(self.window(), &self.selected_rows()) {
            self.cursor = row;
            self.adjust_scroll();
        }
    }

    /// Move the cursor to the previous selected row above the visible page.
    fn jump_previous_selected(&mut self) {
        if let Some(row) = viewport::previous_highlighted(self.window(), &self.selected_rows()) {
            self.cursor = row;
            self.adjust_scroll();
        }
    }

    fn result(&self, cancelled: bool) -> PickResult {
        PickResult {
            value: self.selection.value().to_vec(),
            cancelled,
        }
    }
}

/// Run the interactive picker.
///
/// # Non-TTY Fallback
///
/// If the terminal is not interactive, returns the initial value unchanged.
pub fn pick(options: OptionList<String>, settings: PickSettings) -> anyhow::Result<PickResult> {
    if !is_interactive() || options.is_empty() {
        debug!("non-interactive terminal, keeping initial value");
        return Ok(PickResult {
            value: settings.value,
            cancelled: false,
        });
    }

    let mut state = PickerState::new(options, &settings);

    // Enter raw mode for keyboard input
    terminal::enable_raw_mode()?;
    let result = run_picker_loop(&mut state, &settings.prompt);
    terminal::disable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        cursor::Show,
        cursor::MoveTo(0, 0),
        terminal::Clear(ClearType::All),
    )?;
    stdout.flush()?;

    result
}

/// Check if the terminal is interactive.
///
/// Returns false in these cases:
/// - stdin or stdout is not a TTY
/// - Running in a CI environment (CI env var is set)
/// - TERM is unset or "dumb"
/// - PICKSET_NON_INTERACTIVE env var is set
pub fn is_interactive() -> bool {
    use std::io::IsTerminal;

    if std::env::var("PICKSET_NON_INTERACTIVE").is_ok() {
        return false;
    }

    if std::env::var("CI").is_ok() {
        return false;
    }

    match std::env::var("TERM") {
        Ok(term) if !term.is_empty() && term != "dumb" => {}
        _ => return false,
    }

    io::stdin().is_terminal() && io::stdout().is_terminal()
}

/// Main picker loop.
fn run_picker_loop(state: &mut PickerState, prompt: &str) -> anyhow::Result<PickResult> {
    let mut stdout = io::stdout();

    loop {
        render_ui(&mut stdout, state, prompt)?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }

        match state.mode {
            Mode::Selection => match handle_selection_key(state, key) {
                PickerAction::Continue => {}
                PickerAction::Done => return Ok(state.result(false)),
                PickerAction::Cancel => return Ok(state.result(true)),
                PickerAction::EnterSearch => state.mode = Mode::Search,
            },
            Mode::Search => {
                if handle_search_key(state, key) {
                    state.mode = Mode::Selection;
                }
            }
        }
    }
}

/// Handle a key press in selection mode.
fn handle_selection_key(state: &mut PickerState, key: KeyEvent) -> PickerAction {
    state.selection.modifiers_mut().sync(key.modifiers);
    let toggle_key = state.selection.platform().toggle_key();

    let action = match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            state.cursor_up();
            PickerAction::Continue
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.cursor_down();
            PickerAction::Continue
        }
        KeyCode::Char('n') => {
            state.jump_next_selected();
            PickerAction::Continue
        }
        KeyCode::Char('N') => {
            state.jump_previous_selected();
            PickerAction::Continue
        }

        // Ctrl+C to cancel
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.selection.remove_staged_changes();
            PickerAction::Cancel
        }

        // Toggle-modifier click, or a range if the terminal reports Shift
        KeyCode::Char(' ') => {
            let modifier = (!state.selection.modifiers().shift()).then_some(toggle_key);
            state.click_current(modifier);
            PickerAction::Continue
        }

        // Shift-click
        KeyCode::Char('v') => {
            state.click_current(Some(Modifier::Shift));
            PickerAction::Continue
        }

        // Apply staged changes, or plain click
        KeyCode::Enter => {
            if state.selection.has_staged_changes() {
                state.selection.commit_staged_changes();
                PickerAction::Done
            } else {
                state.selection.modifiers_mut().clear();
                state.click_current(None);
                if state.selection.close_on_select() {
                    PickerAction::Done
                } else {
                    PickerAction::Continue
                }
            }
        }

        KeyCode::Char('s') => {
            state.toggle_current_section();
            PickerAction::Continue
        }

        KeyCode::Char('R') => {
            state.selection.handle_reset();
            PickerAction::Continue
        }

        KeyCode::Char('/') => PickerAction::EnterSearch,

        KeyCode::Esc => {
            state.selection.handle_escape();
            PickerAction::Done
        }

        KeyCode::Char('q') => {
            state.selection.remove_staged_changes();
            PickerAction::Cancel
        }

        _ => PickerAction::Continue,
    };

    if state.sync_commit() && action == PickerAction::Continue {
        return PickerAction::Done;
    }
    action
}

/// Handle a key press in search mode. Returns true if should exit search mode.
fn handle_search_key(state: &mut PickerState, key: KeyEvent) -> bool {
    let mut query = state.selection.search_text().to_string();
    match key.code {
        KeyCode::Enter | KeyCode::Esc => true,
        KeyCode::Backspace => {
            query.pop();
            state.set_search(&query);
            false
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.set_search("");
            true
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            query.push(c);
            state.set_search(&query);
            false
        }
        _ => false,
    }
}

/// Render the picker UI.
fn render_ui(stdout: &mut io::Stdout, state: &PickerState, prompt: &str) -> io::Result<()> {
    execute!(
        stdout,
        cursor::MoveTo(0, 0),
        terminal::Clear(ClearType::FromCursorDown)
    )?;

    execute!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print(prompt),
        ResetColor,
        Print("\r\n\r\n")
    )?;

    render_search_line(stdout, state)?;
    render_selection_summary(stdout, state)?;
    execute!(stdout, Print("\r\n"))?;
    render_option_list(stdout, state)?;
    render_help_line(stdout, state)?;

    stdout.flush()
}

/// Render the search line.
fn render_search_line(stdout: &mut io::Stdout, state: &PickerState) -> io::Result<()> {
    execute!(stdout, Print("Search: "))?;
    let query = state.selection.search_text();

    if state.mode == Mode::Search {
        execute!(
            stdout,
            SetForegroundColor(Color::Yellow),
            Print(query),
            Print("_"),
            ResetColor
        )?;
    } else if query.is_empty() {
        execute!(
            stdout,
            SetForegroundColor(Color::DarkGrey),
            Print("(press / to search)"),
            ResetColor
        )?;
    } else {
        execute!(stdout, Print(query))?;
    }

    execute!(stdout, Print("\r\n"))
}

/// Render the selection summary line.
fn render_selection_summary(stdout: &mut io::Stdout, state: &PickerState) -> io::Result<()> {
    let selection = &state.selection;
    let count = selection.current_value().len();

    execute!(stdout, Print("Selected: "))?;
    if count == 0 {
        execute!(
            stdout,
            SetForegroundColor(Color::DarkGrey),
            Print("none"),
            ResetColor
        )?;
    } else {
        execute!(stdout, Print(humanize_count(count)))?;
    }

    if selection.has_staged_changes() {
        execute!(
            stdout,
            SetForegroundColor(Color::Yellow),
            Print(" (unapplied)"),
            ResetColor
        )?;
    }

    if let Some(max) = selection.max_selected()
        && selection.commit_disabled()
    {
        execute!(
            stdout,
            SetForegroundColor(Color::Red),
            Print(format!(" (limit {max}, changes will be discarded)")),
            ResetColor
        )?;
    }

    execute!(stdout, Print("\r\n"))
}

/// Render the option list.
fn render_option_list(stdout: &mut io::Stdout, state: &PickerState) -> io::Result<()> {
    let visible = state.visible_values();
    let options = state.selection.options();

    if visible.is_empty() {
        execute!(
            stdout,
            SetForegroundColor(Color::DarkGrey),
            Print("  No options match the search\r\n"),
            ResetColor
        )?;
        return Ok(());
    }

    if state.scroll_offset > 0 {
        execute!(
            stdout,
            SetForegroundColor(Color::DarkGrey),
            Print(format!(
                "  ↑ {} more above\r\n",
                humanize_count(state.scroll_offset)
            )),
            ResetColor
        )?;
    }

    let mut last_section: Option<&str> = None;
    for (i, value) in visible
        .iter()
        .enumerate()
        .skip(state.scroll_offset)
        .take(state.page_size)
    {
        let section = options.section_of(value);
        if section.is_some() && section != last_section {
            let label = section
                .and_then(|key| options.section(key))
                .map_or("", |s| s.label.as_str());
            execute!(
                stdout,
                SetForegroundColor(Color::Magenta),
                Print(format!("  {label}\r\n")),
                ResetColor
            )?;
        }
        last_section = section;

        let is_cursor = i == state.cursor;
        if is_cursor {
            execute!(stdout, SetForegroundColor(Color::Cyan), Print("> "))?;
        } else {
            execute!(stdout, Print("  "))?;
        }

        if state.selection.is_selected(value) {
            execute!(
                stdout,
                SetForegroundColor(Color::Green),
                Print("[✓] "),
                ResetColor
            )?;
        } else {
            execute!(stdout, Print("[ ] "))?;
        }

        let option = options.get(value);
        let label = option.map_or(value.as_str(), |o| o.label.as_str());
        execute!(stdout, Print(label))?;
        if let Some(details) = option.and_then(|o| o.details.as_deref()) {
            execute!(
                stdout,
                SetForegroundColor(Color::DarkGrey),
                Print(format!("  {details}")),
                ResetColor
            )?;
        }

        execute!(stdout, ResetColor, Print("\r\n"))?;
    }

    let remaining = visible
        .len()
        .saturating_sub(state.scroll_offset + state.page_size);
    if remaining > 0 {
        execute!(
            stdout,
            SetForegroundColor(Color::DarkGrey),
            Print(format!("  ↓ {} more below\r\n", humanize_count(remaining))),
            ResetColor
        )?;
    }

    Ok(())
}

/// Render a key hint with highlighted key.
fn render_key_hint(stdout: &mut io::Stdout, key: &str, action: &str) -> io::Result<()> {
    execute!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print(key),
        SetForegroundColor(Color::DarkGrey),
        Print(format!(" {action} ")),
        ResetColor
    )
}

/// Render the help line.
fn render_help_line(stdout: &mut io::Stdout, state: &PickerState) -> io::Result<()> {
    execute!(stdout, Print("\r\n"))?;

    if state.mode == Mode::Search {
        execute!(
            stdout,
            SetForegroundColor(Color::DarkGrey),
            Print("Type to search | "),
            ResetColor
        )?;
        render_key_hint(stdout, "Enter/Esc", "done")?;
        render_key_hint(stdout, "Ctrl+C", "clear")?;
    } else {
        render_key_hint(stdout, "↑↓", "move")?;
        render_key_hint(stdout, "Enter", "pick/apply")?;
        if state.selection.is_multiple() {
            render_key_hint(stdout, "Space", "toggle")?;
            render_key_hint(stdout, "v", "range")?;
            render_key_hint(stdout, "s", "section")?;
        }
        render_key_hint(stdout, "n/N", "next/prev selected")?;
        if state.selection.should_show_reset() {
            render_key_hint(stdout, "R", "reset")?;
        }
        render_key_hint(stdout, "/", "search")?;
        render_key_hint(stdout, "Esc", "apply & close")?;
        render_key_hint(stdout, "q", "cancel")?;
    }
    Ok(())
}
