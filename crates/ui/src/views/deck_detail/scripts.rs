use dioxus::document::eval;
use learn_core::model::ItemId;

use super::state::ListReturn;
use super::utils::{LIST_SCROLL_ID, row_dom_id};

/// Current scroll offset of the item list, if it is mounted.
pub async fn read_list_scroll() -> Option<f64> {
    eval(&read_scroll_script(LIST_SCROLL_ID)).join::<f64>().await.ok()
}

/// Put the list back where the user left it and focus the row they opened.
pub async fn restore_list_position(return_to: ListReturn) {
    let script = restore_position_script(LIST_SCROLL_ID, return_to);
    let _ = eval(&script).await;
}

pub async fn focus_row(id: ItemId) {
    let script = focus_element_script(&row_dom_id(id));
    let _ = eval(&script).await;
}

pub async fn focus_element(element_id: &str) {
    let script = focus_element_script(element_id);
    let _ = eval(&script).await;
}

fn read_scroll_script(element_id: &str) -> String {
    format!(
        r#"
        const el = document.getElementById("{element_id}");
        return el ? el.scrollTop : 0;
        "#
    )
}

fn restore_position_script(element_id: &str, return_to: ListReturn) -> String {
    let row_id = row_dom_id(return_to.row_id);
    let offset = if return_to.scroll_offset.is_finite() {
        return_to.scroll_offset.max(0.0)
    } else {
        0.0
    };
    // the list re-renders after the mode switch
    format!(
        r#"
        requestAnimationFrame(() => {{
            const el = document.getElementById("{element_id}");
            if (el) {{ el.scrollTop = {offset}; }}
            const row = document.getElementById("{row_id}");
            if (row) {{ row.focus({{ preventScroll: true }}); }}
        }});
        "#
    )
}

fn focus_element_script(element_id: &str) -> String {
    format!(
        r#"
        requestAnimationFrame(() => {{
            const el = document.getElementById("{element_id}");
            if (el) {{ el.focus(); }}
        }});
        "#
    )
}
