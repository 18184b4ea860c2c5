use std::fmt::Display;
use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::{self, MoveTo};
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue, terminal, ExecutableCommand};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use grimoire_core::error::Result;

use super::types::CycleDirection::{Down, Up};
use super::types::{CycleDirection, SpellChoice, SpellForDisplay, UiState, ViewportState};

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Restore the terminal even on early return or panic.
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Prompts the user to choose a spell from the list.
///
/// Runs an alternate-screen raw-mode event loop until the user selects a
/// spell or quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be put into raw mode or drawn to.
pub fn prompt_for_spell_choice(spells: &[SpellForDisplay]) -> Result<SpellChoice> {
    let mut stdout = stdout();

    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let _raw_mode_guard = RawModeGuard; // When this goes out of scope, raw mode is disabled

    let (width, height) = terminal::size()?;

    let viewport = ViewportState {
        offset: 0,
        height: height.saturating_sub(2), // Subtract 2 for header and filter line
        width,
    };

    let mut ui_state = UiState {
        selected_index: 0,
        viewport,
        is_filtering: false,
        filter_text: String::new(),
    };

    let mut indexes_to_display = filter_displayed_indexes(spells, &ui_state.filter_text);
    let mut new_ui_state = Some(ui_state.clone());
    let mut force_initial_draw = true;

    loop {
        if let Some(state) = new_ui_state.take() {
            if force_initial_draw || state != ui_state {
                force_initial_draw = false;
                indexes_to_display = filter_displayed_indexes(spells, &state.filter_text);
                redraw_ui(&state, &indexes_to_display, spells)?;
            }
            ui_state = state;
        }

        if event::poll(Duration::from_millis(500))? {
            match event::read()? {
                Event::Key(key_event) => {
                    let (choice, new_state, direction) =
                        handle_key_event(key_event, &ui_state, &indexes_to_display)?;

                    if let Some(choice) = choice {
                        return Ok(choice);
                    }

                    if let Some(state) = new_state {
                        new_ui_state = Some(state);
                    }

                    if let Some(direction) = direction {
                        new_ui_state = Some(move_selected_index(
                            &ui_state,
                            indexes_to_display.len(),
                            Some(&direction),
                        ));
                    }
                }
                Event::Resize(width, height) => {
                    new_ui_state = Some(handle_resize(width, height, &ui_state, &indexes_to_display));
                }
                _ => {}
            }
        }
    }
}

/// Handle keyboard events in the spell selection UI
fn handle_key_event(
    key_event: event::KeyEvent,
    ui_state: &UiState,
    indexes_to_display: &[usize],
) -> Result<(Option<SpellChoice>, Option<UiState>, Option<CycleDirection>)> {
    match key_event.code {
        KeyCode::Up | KeyCode::Down => {
            let direction = if key_event.code == KeyCode::Up { Up } else { Down };
            Ok((None, None, Some(direction)))
        }
        KeyCode::Enter => {
            if let Some(spell_index) = indexes_to_display.get(ui_state.selected_index) {
                Ok((Some(SpellChoice::Index(*spell_index)), None, None))
            } else {
                execute!(stdout(), Print("\x07"))?;
                Ok((None, None, None))
            }
        }
        KeyCode::Backspace => {
            if ui_state.is_filtering && !ui_state.filter_text.is_empty() {
                let mut updated_state = ui_state.clone();
                updated_state.filter_text.pop();
                updated_state.selected_index = 0;
                updated_state.viewport.offset = 0;
                return Ok((None, Some(updated_state), None));
            }
            Ok((None, None, None))
        }
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            Ok((Some(SpellChoice::Quit), None, None))
        }
        KeyCode::Char(c) if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.filter_text.push(c);
            updated_state.selected_index = 0;
            updated_state.viewport.offset = 0;
            Ok((None, Some(updated_state), None))
        }
        KeyCode::Esc if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = false;
            updated_state.filter_text = String::new();
            updated_state.selected_index = 0;
            updated_state.viewport.offset = 0;
            Ok((None, Some(updated_state), None))
        }
        KeyCode::Char('/') => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = true;
            Ok((None, Some(updated_state), None))
        }
        KeyCode::Char('q') | KeyCode::Esc => Ok((Some(SpellChoice::Quit), None, None)),
        _ => Ok((None, None, None)),
    }
}

/// Handle window resize events
fn handle_resize(
    width: u16,
    height: u16,
    ui_state: &UiState,
    indexes_to_display: &[usize],
) -> UiState {
    let new_height = height.saturating_sub(2);
    let mut ui_state = ui_state.clone();
    let mut new_viewport = ViewportState {
        width,
        height: new_height,
        offset: ui_state.viewport.offset,
    };

    // If growing taller, try to show more items above current selection
    match new_height.cmp(&ui_state.viewport.height) {
        std::cmp::Ordering::Greater if new_viewport.offset > 0 => {
            let height_increase = new_height - ui_state.viewport.height;
            new_viewport.offset = new_viewport.offset.saturating_sub(height_increase as usize);
        }
        std::cmp::Ordering::Less
            if ui_state.selected_index >= new_viewport.offset + new_height as usize =>
        {
            new_viewport.offset = ui_state
                .selected_index
                .saturating_sub((new_height as usize).saturating_sub(1));

            if new_viewport.offset + new_height as usize > indexes_to_display.len() {
                new_viewport.offset =
                    indexes_to_display.len().saturating_sub(new_height as usize);
            }
        }
        _ => {}
    }

    ui_state.viewport = new_viewport;
    ui_state
}

fn redraw_ui(
    ui_state: &UiState,
    indexes_to_display: &[usize],
    spells: &[SpellForDisplay],
) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(ui_state, indexes_to_display.len())?;

    if indexes_to_display.is_empty() {
        queue!(
            stdout,
            SetForegroundColor(Color::Red),
            Print("No matching spells!".to_string()),
            SetAttribute(Attribute::Reset),
            cursor::MoveToNextLine(1)
        )?;
    } else {
        print_spells_with_selection(ui_state, spells, indexes_to_display)?;
    }

    if ui_state.is_filtering {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            Print(format!("Filter: {}", ui_state.filter_text)),
            SetAttribute(Attribute::Reset)
        )?;
    }

    stdout.flush()?;
    Ok(())
}

/// Print the header for the spell selection UI
fn print_header(ui_state: &UiState, spell_display_count: usize) -> Result<()> {
    let mut stdout = stdout();

    let left_padding_size = 2usize;
    let left_padding = " ".repeat(left_padding_size);

    let instructions = if ui_state.is_filtering {
        "<esc>: Stop Filtering".to_string()
    } else {
        format!(
            "/: Begin Filtering   |   {}/{}   |   q: Quit",
            pad_to_width_of(ui_state.selected_index + 1, spell_display_count),
            spell_display_count
        )
    };

    let right_padding = " ".repeat(
        (ui_state.viewport.width as usize).saturating_sub(left_padding_size + instructions.len()),
    );

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(Color::DarkGreen),
        Print(left_padding),
        Print(instructions),
        Print(right_padding),
        SetBackgroundColor(Color::Reset),
        SetForegroundColor(Color::Reset),
    )?;

    Ok(())
}

/// Pad a value to match the width of the largest value
fn pad_to_width_of<T: Display>(value: T, max_number: usize) -> String {
    let width = format!("{max_number}").len();
    format!("{:>width$}", value.to_string())
}

/// Clear and write a spell row in the selection UI
fn clear_and_write_spell_row(
    row: u16,
    spells: &[SpellForDisplay],
    spell_index: usize,
    is_selected: bool,
    terminal_width: u16,
) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, MoveTo(0, row), Clear(ClearType::CurrentLine))?;

    let index_as_string = pad_to_width_of(spell_index + 1, spells.len());
    let content = format!("[{index_as_string}] {}", spells[spell_index]);

    let padding = " ".repeat((terminal_width as usize).saturating_sub(content.len()));

    if is_selected {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            SetBackgroundColor(Color::DarkBlue),
            SetForegroundColor(Color::Yellow),
        )?;
    }

    queue!(stdout, Print(content), Print(padding))?;

    queue!(
        stdout,
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(Color::Reset),
        SetForegroundColor(Color::Reset),
    )?;

    Ok(())
}

/// Print all visible spells with the selected one highlighted
fn print_spells_with_selection(
    ui_state: &UiState,
    spells: &[SpellForDisplay],
    indexes_to_display: &[usize],
) -> Result<()> {
    let mut stdout = stdout();

    let viewport = &ui_state.viewport;

    let visible_spells = indexes_to_display
        .iter()
        .skip(viewport.offset)
        .take(viewport.height as usize);

    for (i, spell_index) in visible_spells.enumerate() {
        let is_selected = i + viewport.offset == ui_state.selected_index;

        clear_and_write_spell_row(
            i as u16 + 1,
            spells,
            *spell_index,
            is_selected,
            viewport.width,
        )?;
        queue!(stdout, cursor::MoveToNextLine(1))?;
    }

    Ok(())
}

/// Move the selected index in the given direction
fn move_selected_index(
    ui_state: &UiState,
    spells_to_display_length: usize,
    direction: Option<&CycleDirection>,
) -> UiState {
    if spells_to_display_length == 0 {
        return ui_state.clone();
    }

    let mut new_index = ui_state.selected_index;
    let mut ui_state = ui_state.clone();

    match direction {
        Some(Up) => {
            if new_index == 0 {
                new_index = spells_to_display_length - 1;
                ui_state.viewport.offset =
                    new_index.saturating_sub((ui_state.viewport.height as usize).saturating_sub(1));
            } else {
                new_index -= 1;
                if new_index < ui_state.viewport.offset {
                    ui_state.viewport.offset = new_index;
                }
            }
        }
        Some(Down) => {
            new_index = (new_index + 1) % spells_to_display_length;
            if new_index < ui_state.selected_index {
                ui_state.viewport.offset = 0;
            } else if new_index >= ui_state.viewport.offset + ui_state.viewport.height as usize {
                ui_state.viewport.offset =
                    new_index.saturating_sub((ui_state.viewport.height as usize).saturating_sub(1));
            }
        }
        None => {}
    }

    ui_state.selected_index = new_index;
    ui_state
}

/// Filter the displayed spell indexes based on a predicate.
///
/// An empty predicate keeps every spell. A numeric predicate matches the
/// displayed 1-based index; anything else fuzzy-matches the spell's
/// display text.
#[must_use]
pub fn filter_displayed_indexes(spells: &[SpellForDisplay], predicate: &str) -> Vec<usize> {
    if predicate.is_empty() {
        return (0..spells.len()).collect();
    }

    let matcher = SkimMatcherV2::default();
    let predicate_index = predicate.parse::<usize>().ok();

    (0..spells.len())
        .filter(|&i| {
            if let Some(predicate_index) = predicate_index {
                // Index-based filtering
                (i + 1).to_string().contains(&predicate_index.to_string())
            } else {
                // Fuzzy name-based filtering
                matcher
                    .fuzzy_match(&spells[i].to_string(), predicate)
                    .is_some()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui_state(selected_index: usize, offset: usize, height: u16) -> UiState {
        UiState {
            selected_index,
            viewport: ViewportState {
                offset,
                height,
                width: 80,
            },
            is_filtering: false,
            filter_text: String::new(),
        }
    }

    #[test]
    fn test_move_selected_index_down_and_wrap() {
        let state = move_selected_index(&ui_state(0, 0, 10), 3, Some(&Down));
        assert_eq!(state.selected_index, 1);

        let state = move_selected_index(&ui_state(2, 0, 10), 3, Some(&Down));
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.viewport.offset, 0);
    }

    #[test]
    fn test_move_selected_index_up_wraps_to_end() {
        let state = move_selected_index(&ui_state(0, 0, 10), 25, Some(&Up));
        assert_eq!(state.selected_index, 24);
        // The viewport scrolls so the new selection is visible.
        assert_eq!(state.viewport.offset, 15);
    }

    #[test]
    fn test_move_selected_index_down_scrolls_viewport() {
        let state = move_selected_index(&ui_state(9, 0, 10), 25, Some(&Down));
        assert_eq!(state.selected_index, 10);
        assert_eq!(state.viewport.offset, 1);
    }

    #[test]
    fn test_move_selected_index_empty_list_is_noop() {
        let original = ui_state(0, 0, 10);
        let state = move_selected_index(&original, 0, Some(&Down));
        assert_eq!(state, original);
    }

    #[test]
    fn test_pad_to_width_of() {
        assert_eq!(pad_to_width_of(1, 100), "  1");
        assert_eq!(pad_to_width_of(42, 100), " 42");
        assert_eq!(pad_to_width_of(7, 9), "7");
    }
}
