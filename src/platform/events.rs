//! Storage-change notification
//!
//! After a write to the match records, the writer broadcasts the key it
//! changed so any other open screen can re-render. Listeners filter on the
//! key they care about. There is no delivery guarantee: a notification sent
//! before a listener is attached is simply missed.

use std::cell::RefCell;
use std::rc::Rc;

/// Broadcasts "this key changed"
pub trait ChangeNotifier {
    fn notify(&self, key: &str);
}

impl<T: ChangeNotifier + ?Sized> ChangeNotifier for Rc<T> {
    fn notify(&self, key: &str) {
        (**self).notify(key)
    }
}

/// Drops every notification (screens that never write records)
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl ChangeNotifier for Silent {
    fn notify(&self, _key: &str) {}
}

type Listener = Rc<dyn Fn(&str)>;

/// In-process notification feed
#[derive(Default)]
pub struct ChangeFeed {
    listeners: RefCell<Vec<(u32, String, Listener)>>,
    next_id: RefCell<u32>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `f` whenever `key` changes. Returns a handle for `unsubscribe`.
    pub fn subscribe(&self, key: &str, f: impl Fn(&str) + 'static) -> u32 {
        let mut next = self.next_id.borrow_mut();
        let id = *next;
        *next += 1;
        self.listeners
            .borrow_mut()
            .push((id, key.to_string(), Rc::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: u32) {
        self.listeners.borrow_mut().retain(|(i, _, _)| *i != id);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ChangeNotifier for ChangeFeed {
    fn notify(&self, key: &str) {
        // Collect first so listeners may subscribe/unsubscribe re-entrantly
        let matching: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, k, _)| k == key)
            .map(|(_, _, f)| Rc::clone(f))
            .collect();
        for f in matching {
            f(key);
        }
    }
}

/// Dispatches a `storage` event on `window` (wasm32 only).
///
/// Browsers only fire native `storage` events in *other* tabs, so the writer
/// dispatches one itself for listeners in the same page.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNotifier;

#[cfg(target_arch = "wasm32")]
impl ChangeNotifier for BrowserNotifier {
    fn notify(&self, key: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let init = web_sys::StorageEventInit::new();
        init.set_key(Some(key));
        match web_sys::StorageEvent::new_with_event_init_dict("storage", &init) {
            Ok(event) => {
                let _ = window.dispatch_event(&event);
            }
            Err(e) => log::warn!("Could not dispatch storage event: {:?}", e),
        }
    }
}

/// Run `f` on every `storage` event for `key`, from this tab or another
#[cfg(target_arch = "wasm32")]
pub fn on_storage_change(key: &'static str, f: impl Fn() + 'static) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::Closure;

    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::StorageEvent| {
        if event.key().as_deref() == Some(key) {
            f();
        }
    });
    let _ = window.add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref());
    closure.forget();
}
