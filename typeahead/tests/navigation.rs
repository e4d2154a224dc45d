mod common;

use common::{drain, fruit_typeahead};
use typeahead::{
    EventResult, FilterMode, InputEvent, Key, KeyCombo, Modifiers, Notification,
    TypeaheadConfig,
};

#[tokio::test]
async fn test_typing_filters_and_highlights_first_row() {
    let (typeahead, _rx) = fruit_typeahead(TypeaheadConfig::for_items());
    typeahead.on_focus_in();
    typeahead.on_text_changed("a").await.unwrap();

    assert_eq!(typeahead.filtered_texts(), vec!["Apple", "Avocado"]);
    assert_eq!(typeahead.filtered_values(), vec![1, 3]);
    assert_eq!(typeahead.active_index(), Some(0));
}

#[tokio::test]
async fn test_contains_mode_filters_substring() {
    let (typeahead, _rx) =
        fruit_typeahead(TypeaheadConfig::for_items().filter(FilterMode::Contains));
    typeahead.on_text_changed("an").await.unwrap();

    assert_eq!(typeahead.filtered_texts(), vec!["Banana"]);
}

#[tokio::test]
async fn test_arrow_down_clamps_at_last_row() {
    let (typeahead, mut rx) = fruit_typeahead(TypeaheadConfig::for_items());
    typeahead.on_focus_in();
    typeahead.on_text_changed("a").await.unwrap();
    drain(&mut rx);

    let down = KeyCombo::key(Key::Down);
    assert_eq!(typeahead.on_key(down).await.unwrap(), EventResult::Consumed);
    assert_eq!(typeahead.on_key(down).await.unwrap(), EventResult::Consumed);

    assert_eq!(typeahead.active_index(), Some(1));
    assert_eq!(typeahead.selected_text(), "Avocado");
    // Preview only, nothing committed
    assert_eq!(typeahead.selected_value(), None);
    assert_eq!(typeahead.current_search(), "a");
    assert_eq!(
        drain(&mut rx),
        vec![
            Notification::TextChanged("Avocado".into()),
            Notification::TextChanged("Avocado".into()),
        ]
    );
}

#[tokio::test]
async fn test_arrow_up_clamps_at_first_row() {
    let (typeahead, mut rx) = fruit_typeahead(TypeaheadConfig::for_items());
    typeahead.on_text_changed("a").await.unwrap();
    typeahead.on_key(Key::Down.into()).await.unwrap();
    typeahead.on_key(Key::Up.into()).await.unwrap();
    typeahead.on_key(Key::Up.into()).await.unwrap();
    drain(&mut rx);

    assert_eq!(typeahead.active_index(), Some(0));
    assert_eq!(typeahead.selected_text(), "Apple");
}

#[tokio::test]
async fn test_arrows_without_candidates_are_ignored() {
    let (typeahead, mut rx) = fruit_typeahead(TypeaheadConfig::for_items());
    typeahead.on_text_changed("zz").await.unwrap();
    drain(&mut rx);

    assert_eq!(typeahead.active_index(), None);
    assert_eq!(
        typeahead.on_key(Key::Down.into()).await.unwrap(),
        EventResult::Ignored
    );
    assert!(drain(&mut rx).is_empty());
    assert_eq!(typeahead.selected_text(), "zz");
}

#[tokio::test]
async fn test_new_search_resets_highlight() {
    let (typeahead, _rx) = fruit_typeahead(TypeaheadConfig::for_items());
    typeahead.on_text_changed("a").await.unwrap();
    typeahead.on_key(Key::Down.into()).await.unwrap();
    assert_eq!(typeahead.active_index(), Some(1));

    typeahead.on_text_changed("av").await.unwrap();
    assert_eq!(typeahead.active_index(), Some(0));
    assert_eq!(typeahead.filtered_texts(), vec!["Avocado"]);
}

#[tokio::test]
async fn test_enter_commits_highlighted_row() {
    let (typeahead, mut rx) = fruit_typeahead(TypeaheadConfig::for_items());
    typeahead.on_focus_in();
    typeahead.on_text_changed("a").await.unwrap();
    typeahead.on_key(Key::Down.into()).await.unwrap();
    drain(&mut rx);

    let result = typeahead.on_key(Key::Enter.into()).await.unwrap();

    assert_eq!(result, EventResult::Consumed);
    assert_eq!(typeahead.selected_value(), Some(3));
    assert_eq!(typeahead.selected_text(), "Avocado");
    assert_eq!(typeahead.current_search(), "");
    assert_eq!(
        drain(&mut rx),
        vec![
            Notification::ValueChanged(Some(3)),
            Notification::SearchChanged(String::new()),
            Notification::TextChanged("Avocado".into()),
        ]
    );
}

#[tokio::test]
async fn test_tab_commits_like_enter() {
    let (typeahead, _rx) = fruit_typeahead(TypeaheadConfig::for_items());
    typeahead.on_text_changed("b").await.unwrap();

    let result = typeahead.on_key(Key::Tab.into()).await.unwrap();

    assert_eq!(result, EventResult::Consumed);
    assert_eq!(typeahead.selected_value(), Some(2));
}

#[tokio::test]
async fn test_enter_below_min_length_is_ignored() {
    let (typeahead, mut rx) = fruit_typeahead(TypeaheadConfig::for_items().min_length(2));
    typeahead.on_focus_in();
    typeahead.on_text_changed("a").await.unwrap();
    drain(&mut rx);

    assert!(!typeahead.dropdown_visible());
    let result = typeahead.on_key(Key::Tab.into()).await.unwrap();

    assert_eq!(result, EventResult::Ignored);
    assert_eq!(typeahead.selected_value(), None);
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_enter_without_value_field_is_noop() {
    let config = TypeaheadConfig::<common::Fruit, u32>::new()
        .text_field(|fruit: &common::Fruit| Some(fruit.1.to_string()));
    let (typeahead, mut rx) = fruit_typeahead(config);
    typeahead.on_text_changed("a").await.unwrap();
    drain(&mut rx);

    let result = typeahead.on_key(Key::Enter.into()).await.unwrap();

    assert_eq!(result, EventResult::Ignored);
    assert_eq!(typeahead.selected_value(), None);
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn test_modified_keys_are_ignored() {
    let (typeahead, _rx) = fruit_typeahead(TypeaheadConfig::for_items());
    typeahead.on_text_changed("a").await.unwrap();

    let result = typeahead
        .on_key(KeyCombo::key(Key::Enter).ctrl())
        .await
        .unwrap();

    assert_eq!(result, EventResult::Ignored);
    assert_eq!(typeahead.selected_value(), None);

    let alt_enter = KeyCombo {
        key: Key::Enter,
        modifiers: Modifiers {
            alt: true,
            ..Modifiers::NONE
        },
    };
    assert_eq!(typeahead.on_key(alt_enter).await.unwrap(), EventResult::Ignored);
}

#[tokio::test]
async fn test_shift_does_not_block_commit() {
    let (typeahead, _rx) = fruit_typeahead(TypeaheadConfig::for_items());
    typeahead.on_text_changed("b").await.unwrap();

    let shift_tab = KeyCombo {
        key: Key::Tab,
        modifiers: Modifiers {
            shift: true,
            ..Modifiers::NONE
        },
    };

    assert_eq!(typeahead.on_key(shift_tab).await.unwrap(), EventResult::Consumed);
    assert_eq!(typeahead.selected_value(), Some(2));
}

#[tokio::test]
async fn test_escape_clears_with_one_notification_each() {
    let (typeahead, mut rx) = fruit_typeahead(TypeaheadConfig::for_items());
    typeahead.on_text_changed("ap").await.unwrap();
    typeahead.on_key(Key::Enter.into()).await.unwrap();
    assert_eq!(typeahead.selected_value(), Some(1));
    drain(&mut rx);

    let result = typeahead
        .handle_event(InputEvent::Key(Key::Escape.into()))
        .await
        .unwrap();

    assert_eq!(result, EventResult::Consumed);
    assert_eq!(typeahead.selected_value(), None);
    assert_eq!(typeahead.selected_text(), "");
    assert_eq!(typeahead.current_search(), "");
    assert_eq!(
        drain(&mut rx),
        vec![
            Notification::ValueChanged(None),
            Notification::SearchChanged(String::new()),
            Notification::TextChanged(String::new()),
        ]
    );
}

#[tokio::test]
async fn test_active_index_stays_in_bounds() {
    let (typeahead, _rx) = fruit_typeahead(TypeaheadConfig::for_items());
    typeahead.on_text_changed("").await.unwrap();
    let steps = [Key::Down, Key::Down, Key::Down, Key::Down, Key::Up, Key::Down];
    for key in steps {
        typeahead.on_key(key.into()).await.unwrap();
        let count = typeahead.filtered_count();
        let active = typeahead.active_index().unwrap();
        assert!(active < count, "active {active} out of {count}");
    }
    assert_eq!(typeahead.active_index(), Some(2));
}
