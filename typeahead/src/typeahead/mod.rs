//! The typeahead widget: search text, filtered candidates, active row and
//! selection kept consistent across input events.

mod events;
mod view;

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::TypeaheadConfig;
use crate::error::{HandlerError, TypeaheadError};
use crate::filter::{FilterCache, FilterKey, filter_indices};
use crate::handlers::{InputElement, NoopHandlers, TypeaheadHandlers};

pub use view::{RowView, TypeaheadView};

/// Unique identifier for a Typeahead widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeaheadId(usize);

impl TypeaheadId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for TypeaheadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__typeahead_{}", self.0)
    }
}

/// Host inputs applied before each render.
///
/// `data` and `value` are applied every time (an absent data source means an
/// empty list, an absent value means no selection). `config` is only
/// replaced when present.
pub struct Parameters<T, V> {
    pub data: Option<Arc<Vec<T>>>,
    pub value: Option<V>,
    pub config: Option<TypeaheadConfig<T, V>>,
}

impl<T, V> Default for Parameters<T, V> {
    fn default() -> Self {
        Self {
            data: None,
            value: None,
            config: None,
        }
    }
}

impl<T, V> Parameters<T, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(mut self, data: Arc<Vec<T>>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn value(mut self, value: Option<V>) -> Self {
        self.value = value;
        self
    }

    pub fn config(mut self, config: TypeaheadConfig<T, V>) -> Self {
        self.config = Some(config);
        self
    }
}

/// Internal state for a Typeahead widget.
struct TypeaheadInner<T, V> {
    config: TypeaheadConfig<T, V>,
    /// Bumped whenever the config (and so the projectors) is replaced
    generation: u64,

    data: Option<Arc<Vec<T>>>,
    data_version: u64,
    filtered: FilterCache,

    /// Text the candidates are filtered by
    current_search: String,
    /// Text shown in the input
    selected_text: String,
    selected_value: Option<V>,
    /// Highlighted row, index into the filtered list
    active_index: usize,
    focused: bool,
    /// Bumped on every focus-in so a pending blur can tell it was overtaken
    focus_epoch: u64,

    /// Last externally bound value seen by `apply_parameters`
    bound_value: Option<V>,
    reconcile_pending: bool,

    input: Option<Arc<dyn InputElement>>,
}

impl<T, V> TypeaheadInner<T, V>
where
    V: Clone + PartialEq,
{
    fn new(config: TypeaheadConfig<T, V>) -> Self {
        Self {
            config,
            generation: 0,
            data: None,
            data_version: 0,
            filtered: FilterCache::default(),
            current_search: String::new(),
            selected_text: String::new(),
            selected_value: None,
            active_index: 0,
            focused: false,
            focus_epoch: 0,
            bound_value: None,
            reconcile_pending: false,
            input: None,
        }
    }

    fn items(&self) -> &[T] {
        self.data.as_deref().map(Vec::as_slice).unwrap_or(&[])
    }

    fn set_data(&mut self, data: Option<Arc<Vec<T>>>) {
        let same = match (&self.data, &data) {
            (Some(old), Some(new)) => Arc::ptr_eq(old, new),
            (None, None) => true,
            _ => false,
        };
        if !same {
            self.data = data;
            self.data_version += 1;
            self.filtered.invalidate();
        }
    }

    fn set_config(&mut self, config: TypeaheadConfig<T, V>) {
        self.config = config;
        self.generation += 1;
        self.filtered.invalidate();
    }

    fn filter_key(&self) -> FilterKey {
        FilterKey {
            data_version: self.data_version,
            search: self.current_search.clone(),
            mode: self.config.options.filter,
            generation: self.generation,
        }
    }

    /// Recompute the filtered list if anything it depends on changed.
    /// A recompute moves the highlight back to the first row.
    fn refresh_filter(&mut self) -> bool {
        let key = self.filter_key();
        if !self.filtered.is_stale(&key) {
            return false;
        }
        let indices = filter_indices(
            self.items(),
            &self.current_search,
            self.config.options.filter,
            self.config.text_field.as_ref(),
            self.config.custom_filter.as_ref(),
        );
        log::debug!(
            "Typeahead refilter search={:?} mode={:?} matched={}/{}",
            self.current_search,
            self.config.options.filter,
            indices.len(),
            self.items().len()
        );
        self.filtered.store(key, indices);
        self.active_index = 0;
        true
    }

    fn filtered_count(&mut self) -> usize {
        self.refresh_filter();
        self.filtered.len()
    }

    /// Source index of the highlighted row.
    fn active_source_index(&mut self) -> Option<usize> {
        self.refresh_filter();
        self.filtered.indices().get(self.active_index).copied()
    }

    fn text_of(&self, item: &T) -> String {
        self.config
            .text_field
            .as_ref()
            .and_then(|text_field| text_field(item))
            .unwrap_or_default()
    }

    fn value_of(&self, item: &T) -> Option<V> {
        self.config
            .value_field
            .as_ref()
            .map(|value_field| value_field(item))
    }

    /// Find the item whose value equals `value`, returning its value and text.
    fn resolve(&self, value: &V) -> Option<(V, String)> {
        let value_field = self.config.value_field.as_ref()?;
        self.items().iter().find_map(|item| {
            let candidate = value_field(item);
            (candidate == *value).then(|| (candidate, self.text_of(item)))
        })
    }

    /// Drop the selection, shown text and search. The remembered bound value
    /// goes too, so the host re-sending its old value reconciles again.
    fn clear_selection(&mut self) {
        self.selected_value = None;
        self.selected_text.clear();
        self.current_search.clear();
        self.filtered.invalidate();
        self.bound_value = None;
        self.reconcile_pending = false;
    }

    fn searchable(&self) -> bool {
        self.current_search.chars().count() >= self.config.options.min_length
    }

    fn dropdown_visible(&self) -> bool {
        self.config.text_field.is_some() && self.searchable()
    }

    fn can_search(&mut self) -> bool {
        self.filtered_count() > 0 && self.searchable() && self.focused
    }

    fn not_found_visible(&mut self) -> bool {
        self.filtered_count() == 0
            && self.searchable()
            && self.focused
            && self.config.options.not_found_text.is_some()
    }
}

/// A text input with a filtered dropdown of candidates.
///
/// `Typeahead` is a cheap-to-clone handle; clones share state. Event
/// methods are async because host notifications are awaited in order.
/// Internal locks are never held across an await, so a click handled on one
/// clone can land while another clone waits out the focus-out grace delay.
///
/// # Example
///
/// ```ignore
/// let fruits = Arc::new(vec![(1, "Apple"), (2, "Banana"), (3, "Avocado")]);
/// let typeahead = Typeahead::new(TypeaheadConfig::for_items())
///     .with_handlers(Arc::new(form_handlers));
/// typeahead.set_data(Some(fruits));
///
/// typeahead.on_focus_in();
/// typeahead.on_text_changed("a").await?;
/// typeahead.on_key(Key::Enter.into()).await?;
/// assert_eq!(typeahead.selected_value(), Some(1));
/// ```
pub struct Typeahead<T, V: Send + Sync + 'static> {
    id: TypeaheadId,
    inner: Arc<RwLock<TypeaheadInner<T, V>>>,
    handlers: Arc<dyn TypeaheadHandlers<V>>,
}

impl<T, V: Send + Sync + 'static> Clone for Typeahead<T, V> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            handlers: Arc::clone(&self.handlers),
        }
    }
}

impl<T, V: Send + Sync + 'static> fmt::Debug for Typeahead<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typeahead").field("id", &self.id).finish()
    }
}

impl<T, V> Typeahead<T, V>
where
    T: Send + Sync + 'static,
    V: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a typeahead with no data and no-op handlers.
    pub fn new(config: TypeaheadConfig<T, V>) -> Self {
        Self {
            id: TypeaheadId::new(),
            inner: Arc::new(RwLock::new(TypeaheadInner::new(config))),
            handlers: Arc::new(NoopHandlers),
        }
    }

    /// Attach the host's notification sinks.
    pub fn with_handlers(mut self, handlers: Arc<dyn TypeaheadHandlers<V>>) -> Self {
        self.handlers = handlers;
        self
    }

    /// Attach the bound input element.
    pub fn with_input(self, input: Arc<dyn InputElement>) -> Self {
        self.bind_input(input);
        self
    }

    /// Get the unique ID for this typeahead.
    pub fn id(&self) -> TypeaheadId {
        self.id
    }

    fn read<R>(&self, f: impl FnOnce(&TypeaheadInner<T, V>) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write<R>(&self, f: impl FnOnce(&mut TypeaheadInner<T, V>) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    // -------------------------------------------------------------------------
    // Host parameters
    // -------------------------------------------------------------------------

    /// Bind (or rebind) the input element.
    pub fn bind_input(&self, input: Arc<dyn InputElement>) {
        self.write(|inner| inner.input = Some(input));
    }

    /// Replace the data source. The filter is invalidated only when a
    /// different list is passed.
    pub fn set_data(&self, data: Option<Arc<Vec<T>>>) {
        self.write(|inner| inner.set_data(data));
    }

    /// Replace the configuration.
    pub fn set_config(&self, config: TypeaheadConfig<T, V>) {
        self.write(|inner| inner.set_config(config));
    }

    /// Apply host parameters.
    ///
    /// Returns true when the externally bound value changed and a reconcile
    /// is waiting for [`after_render`](Self::after_render).
    pub fn apply_parameters(&self, params: Parameters<T, V>) -> bool {
        let Parameters {
            data,
            value,
            config,
        } = params;
        self.write(|inner| {
            if let Some(config) = config {
                inner.set_config(config);
            }
            inner.set_data(data);
            if value != inner.bound_value {
                inner.reconcile_pending = value != inner.selected_value;
                inner.bound_value = value;
            }
            inner.reconcile_pending
        })
    }

    /// Sync an externally changed value into the displayed text.
    ///
    /// Runs after the host has applied every parameter of the current render
    /// so the lookup sees the final data source.
    pub async fn after_render(&self) -> Result<(), TypeaheadError> {
        let reconciled = self.write(|inner| {
            if !std::mem::take(&mut inner.reconcile_pending) {
                return None;
            }
            let value = inner.bound_value.clone();
            let text = value
                .as_ref()
                .and_then(|value| inner.resolve(value))
                .map(|(_, text)| text)
                .unwrap_or_default();
            inner.selected_value = value;
            inner.selected_text = text.clone();
            Some((text, inner.input.clone()))
        });
        let Some((text, input)) = reconciled else {
            return Ok(());
        };

        log::debug!("Typeahead {} reconciled bound value text={:?}", self.id, text);
        self.emit_text_changed(text).await?;
        if let Some(input) = input {
            input.revalidate();
        }
        Ok(())
    }

    /// Move keyboard focus to the bound input, if one is bound.
    pub async fn focus(&self, scroll_into_view: bool) {
        let input = self.read(|inner| inner.input.clone());
        if let Some(input) = input {
            input.focus(scroll_into_view).await;
        }
    }

    // -------------------------------------------------------------------------
    // State accessors
    // -------------------------------------------------------------------------

    /// The selected value, `None` when nothing is selected.
    pub fn selected_value(&self) -> Option<V> {
        self.read(|inner| inner.selected_value.clone())
    }

    /// The text shown in the input.
    pub fn selected_text(&self) -> String {
        self.read(|inner| inner.selected_text.clone())
    }

    /// The text candidates are filtered by.
    pub fn current_search(&self) -> String {
        self.read(|inner| inner.current_search.clone())
    }

    /// Whether the input currently has focus.
    pub fn is_focused(&self) -> bool {
        self.read(|inner| inner.focused)
    }

    /// Current configuration.
    pub fn config(&self) -> TypeaheadConfig<T, V> {
        self.read(|inner| inner.config.clone())
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    fn handler_failed(&self, handler: &'static str, source: HandlerError) -> TypeaheadError {
        log::warn!("Typeahead {} {} handler failed: {}", self.id, handler, source);
        TypeaheadError::handler(handler, source)
    }

    async fn emit_value_changed(&self, value: Option<V>) -> Result<(), TypeaheadError> {
        self.handlers
            .on_value_changed(value)
            .await
            .map_err(|e| self.handler_failed("value_changed", e))
    }

    async fn emit_text_changed(&self, text: String) -> Result<(), TypeaheadError> {
        self.handlers
            .on_text_changed(text)
            .await
            .map_err(|e| self.handler_failed("text_changed", e))
    }

    async fn emit_search_changed(&self, search: String) -> Result<(), TypeaheadError> {
        self.handlers
            .on_search_changed(search)
            .await
            .map_err(|e| self.handler_failed("search_changed", e))
    }

    async fn emit_not_found(&self, search: String) -> Result<(), TypeaheadError> {
        self.handlers
            .on_not_found(search)
            .await
            .map_err(|e| self.handler_failed("not_found", e))
    }
}
