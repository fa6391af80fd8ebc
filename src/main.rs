//! Paradox Tournament entry point
//!
//! On the web, picks the screen from the page path, renders it into the page
//! and wires its inputs to the tracker's command handlers.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement};

    use paradox_tournament::persistence::{KeyValueStore, MemoryStore, keys};
    use paradox_tournament::platform::{BrowserNotifier, LocalStore, on_storage_change};
    use paradox_tournament::tournament::{MatchField, MatchId, parse_date};
    use paradox_tournament::view::schedule::{
        RESULT_SAVED_MESSAGE, SAVE_RESULT_LABEL, SELECT_WINNER_LABEL, parse_winner_value,
        winner_value,
    };
    use paradox_tournament::view::setup::{LOCKED_MESSAGE, SAVE_BUTTON_LABEL, SAVED_MESSAGE};
    use paradox_tournament::view::{BracketView, LeaderboardView, ScheduleView, Screen, SetupView};
    use paradox_tournament::{Tracker, TrackerError, TrackerSettings};

    type ScreenTracker = Tracker<Rc<dyn KeyValueStore>, BrowserNotifier>;
    type Shared = Rc<RefCell<ScreenTracker>>;

    /// Blocking alert, the way every user-facing message is shown
    fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    /// Report a failed command: validation errors go to the user, the rest to
    /// the console
    fn report(err: &TrackerError) {
        if err.is_user_facing() {
            alert(&err.to_string());
        } else {
            log::error!("{}", err);
        }
    }

    fn open_store() -> Rc<dyn KeyValueStore> {
        match LocalStore::open() {
            Some(store) => Rc::new(store),
            None => {
                log::warn!("LocalStorage unavailable, data will not survive a reload");
                Rc::new(MemoryStore::new())
            }
        }
    }

    fn create(document: &Document, tag: &str, class: Option<&str>) -> Result<Element, JsValue> {
        let el = document.create_element(tag)?;
        if let Some(class) = class {
            el.set_class_name(class);
        }
        Ok(el)
    }

    fn cell(document: &Document, text: &str) -> Result<Element, JsValue> {
        let td = create(document, "td", None)?;
        td.set_text_content(Some(text));
        Ok(td)
    }

    pub fn run() {
        console_error_panic_hook::set_once();

        let store = open_store();
        let level = TrackerSettings::load(&store).log_level();
        let _ = console_log::init_with_level(level);

        log::info!("Paradox Tournament starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let path = window.location().pathname().unwrap_or_default();
        let Some(screen) = Screen::from_path(&path) else {
            log::info!("No tracker screen on {}", path);
            return;
        };

        let tracker: Shared = Rc::new(RefCell::new(Tracker::open(store, BrowserNotifier)));

        let result = match screen {
            Screen::Setup => render_setup(&document, tracker),
            Screen::Schedule => render_schedule(&document, tracker),
            Screen::Leaderboard => {
                let rendered = render_leaderboard(&document, &tracker);
                watch_leaderboard(document.clone(), tracker);
                rendered
            }
            Screen::Bracket => render_bracket(&document, &tracker),
        };

        match result {
            Ok(()) => log::info!("Rendered {} screen", screen.as_str()),
            Err(e) => log::error!("Rendering {} failed: {:?}", screen.as_str(), e),
        }
    }

    fn render_setup(document: &Document, tracker: Shared) -> Result<(), JsValue> {
        let Some(container) = document.get_element_by_id("teamSetupContainer") else {
            return Ok(());
        };
        container.set_inner_html("");

        let view = SetupView::build(tracker.borrow().state());
        for input in &view.inputs {
            let el: HtmlInputElement = create(document, "input", Some("team-input"))?.dyn_into()?;
            el.set_type("text");
            el.set_value(&input.value);
            el.set_placeholder(&input.placeholder);
            el.set_disabled(input.disabled);
            el.set_attribute("data-idx", &input.index.to_string())?;
            container.append_child(&el)?;
        }

        if view.show_save_button() {
            let btn = create(document, "button", None)?;
            btn.set_text_content(Some(SAVE_BUTTON_LABEL));

            let container_ref = container.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let Ok(inputs) = container_ref.query_selector_all("input.team-input") else {
                    return;
                };
                let names: Vec<String> = (0..inputs.length())
                    .filter_map(|i| inputs.item(i))
                    .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .collect();

                let saved = tracker.borrow_mut().on_save_roster(&names);
                match saved {
                    Ok(()) => {
                        alert(SAVED_MESSAGE);
                        // Reload to show the locked state
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().reload();
                        }
                    }
                    Err(e) => report(&e),
                }
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
            container.append_child(&btn)?;
        } else {
            let msg = create(document, "p", Some("white-text"))?;
            msg.set_text_content(Some(LOCKED_MESSAGE));
            container.append_child(&msg)?;
        }
        Ok(())
    }

    fn render_schedule(document: &Document, tracker: Shared) -> Result<(), JsValue> {
        let Some(tbody) = document.query_selector("#matchesTable tbody")? else {
            return Ok(());
        };
        tbody.set_inner_html("");

        let view = ScheduleView::build(tracker.borrow().state());
        for row in &view.rows {
            let tr = create(document, "tr", None)?;
            tr.append_child(&cell(document, &row.number.to_string())?)?;
            tr.append_child(&cell(document, &row.label)?)?;

            // Date: saved as soon as it changes
            let td_date = create(document, "td", None)?;
            let date_input: HtmlInputElement = create(document, "input", None)?.dyn_into()?;
            date_input.set_type("date");
            date_input.set_value(&row.date);
            {
                let tracker = tracker.clone();
                let input = date_input.clone();
                let id = row.id;
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    let date = parse_date(&input.value());
                    if let Err(e) = tracker
                        .borrow_mut()
                        .on_set_match_field(id, MatchField::Date(date))
                    {
                        report(&e);
                    }
                });
                date_input
                    .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
            td_date.append_child(&date_input)?;
            tr.append_child(&td_date)?;

            // Winner: saved on "Save Result"
            let td_winner = create(document, "td", None)?;
            let select: HtmlSelectElement = create(document, "select", None)?.dyn_into()?;
            let empty = create(document, "option", None)?;
            empty.set_attribute("value", "")?;
            empty.set_text_content(Some(SELECT_WINNER_LABEL));
            select.append_child(&empty)?;
            for option in &row.options {
                let opt = create(document, "option", None)?;
                opt.set_attribute("value", &winner_value(option.team))?;
                opt.set_text_content(Some(&option.name));
                select.append_child(&opt)?;
            }
            select.set_value(&row.selected.map(winner_value).unwrap_or_default());
            td_winner.append_child(&select)?;
            tr.append_child(&td_winner)?;

            let td_action = create(document, "td", None)?;
            let btn = create(document, "button", None)?;
            btn.set_text_content(Some(SAVE_RESULT_LABEL));
            {
                let tracker = tracker.clone();
                let id = row.id;
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    save_result(&tracker, id, &select);
                });
                btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
            td_action.append_child(&btn)?;
            tr.append_child(&td_action)?;

            tbody.append_child(&tr)?;
        }
        Ok(())
    }

    fn save_result(tracker: &Shared, id: MatchId, select: &HtmlSelectElement) {
        let winner = parse_winner_value(&select.value());
        // Borrow must end before the alert
        let saved = tracker.borrow_mut().on_save_result(id, winner);
        match saved {
            Ok(()) => alert(RESULT_SAVED_MESSAGE),
            Err(e) => report(&e),
        }
    }

    fn render_leaderboard(document: &Document, tracker: &Shared) -> Result<(), JsValue> {
        let Some(tbody) = document.query_selector("#leaderboardTable tbody")? else {
            return Ok(());
        };
        tbody.set_inner_html("");

        let view = LeaderboardView::build(tracker.borrow().state());
        for row in &view.rows {
            let tr = create(document, "tr", None)?;
            tr.append_child(&cell(document, &row.team)?)?;
            tr.append_child(&cell(document, &row.played.to_string())?)?;
            tr.append_child(&cell(document, &row.wins.to_string())?)?;
            tr.append_child(&cell(document, &row.losses.to_string())?)?;
            tr.append_child(&cell(document, &row.win_pct)?)?;
            tbody.append_child(&tr)?;
        }
        Ok(())
    }

    /// Re-render whenever another screen records a result
    fn watch_leaderboard(document: Document, tracker: Shared) {
        on_storage_change(keys::MATCHES, move || {
            tracker.borrow_mut().reload();
            if let Err(e) = render_leaderboard(&document, &tracker) {
                log::error!("Leaderboard refresh failed: {:?}", e);
            }
        });
    }

    fn render_bracket(document: &Document, tracker: &Shared) -> Result<(), JsValue> {
        let Some(container) = document.get_element_by_id("bracketContainer") else {
            return Ok(());
        };
        container.set_inner_html("");

        let view = BracketView::build(tracker.borrow().state());
        for slot in &view.slots {
            let div = create(document, "div", Some("bracket-slot"))?;
            div.set_attribute("style", &format!("animation-delay: {}s", slot.animation_delay))?;

            let name = create(document, "strong", None)?;
            name.set_text_content(Some(&slot.team));
            div.append_child(&name)?;
            div.append_child(&create(document, "br", None)?)?;
            div.append_child(&document.create_text_node(&slot.wins_label()))?;

            container.append_child(&div)?;
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Paradox Tournament (native) starting...");
    log::info!("The tracker runs in the browser - build for wasm32 and serve with `trunk serve`");

    println!("\nSample round-robin:");
    if let Err(e) = demo() {
        eprintln!("Demo failed: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Run a short tournament against an in-memory store and print the table
#[cfg(not(target_arch = "wasm32"))]
fn demo() -> paradox_tournament::Result<()> {
    use paradox_tournament::Tracker;
    use paradox_tournament::persistence::MemoryStore;
    use paradox_tournament::platform::Silent;
    use paradox_tournament::tournament::{MatchId, TeamId};
    use paradox_tournament::view::LeaderboardView;

    let mut tracker = Tracker::open(MemoryStore::new(), Silent);
    tracker.on_save_roster(&["Wolves", "Bears", "Hawks", "Otters"])?;
    tracker.on_save_result(MatchId::new(0, 1), Some(TeamId(0)))?;
    tracker.on_save_result(MatchId::new(1, 2), Some(TeamId(1)))?;
    tracker.on_save_result(MatchId::new(2, 3), Some(TeamId(3)))?;

    let schedule = tracker.state().schedule();
    println!(
        "{} teams, {} matches, {} recorded\n",
        tracker.state().roster.len(),
        schedule.len(),
        tracker.state().results.recorded_count()
    );
    print!("{}", LeaderboardView::build(tracker.state()));
    Ok(())
}
