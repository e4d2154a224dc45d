#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;
use typeahead::{
    ChannelHandlers, InputElement, Notification, Parameters, Typeahead, TypeaheadConfig,
};

pub type Fruit = (u32, &'static str);

pub fn fruits() -> Arc<Vec<Fruit>> {
    Arc::new(vec![(1, "Apple"), (2, "Banana"), (3, "Avocado")])
}

/// Typeahead over `fruits()` with a channel sink attached.
pub fn fruit_typeahead(
    config: TypeaheadConfig<Fruit, u32>,
) -> (Typeahead<Fruit, u32>, UnboundedReceiver<Notification<u32>>) {
    let (handlers, rx) = ChannelHandlers::new();
    let typeahead = Typeahead::new(config).with_handlers(Arc::new(handlers));
    typeahead.apply_parameters(Parameters::new().data(fruits()));
    (typeahead, rx)
}

pub fn drain(rx: &mut UnboundedReceiver<Notification<u32>>) -> Vec<Notification<u32>> {
    let mut out = Vec::new();
    while let Ok(notification) = rx.try_recv() {
        out.push(notification);
    }
    out
}

/// Input element that counts calls.
#[derive(Debug, Default)]
pub struct CountingInput {
    pub focus_calls: AtomicUsize,
    pub revalidate_calls: AtomicUsize,
}

impl CountingInput {
    pub fn revalidations(&self) -> usize {
        self.revalidate_calls.load(Ordering::SeqCst)
    }

    pub fn focuses(&self) -> usize {
        self.focus_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InputElement for CountingInput {
    async fn focus(&self, _scroll_into_view: bool) {
        self.focus_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn revalidate(&self) {
        self.revalidate_calls.fetch_add(1, Ordering::SeqCst);
    }
}
