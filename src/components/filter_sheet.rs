//! Installment Filter Sheet
//!
//! Status and child chips. Changes are drafted locally and only sent to
//! the list on "Apply".

use leptos::prelude::*;
use leptos_sheet::{SheetConfig, SheetHeight};
use paged_list::Filters;

use super::BottomSheet;
use crate::models::{Installment, InstallmentStatus};

pub const STATUS_FILTER: &str = "status";
pub const CHILD_FILTER: &str = "childId";

pub fn installment_filters(status: Option<InstallmentStatus>, child_id: Option<u32>) -> Filters {
    let mut filters = Filters::new();
    if let Some(status) = status {
        filters.insert(STATUS_FILTER.to_string(), status.as_str().to_string());
    }
    if let Some(child_id) = child_id {
        filters.insert(CHILD_FILTER.to_string(), child_id.to_string());
    }
    filters
}

pub fn parse_status(filters: &Filters) -> Option<InstallmentStatus> {
    let value = filters.get(STATUS_FILTER)?;
    InstallmentStatus::ALL.into_iter().find(|s| s.as_str() == value)
}

pub fn parse_child(filters: &Filters) -> Option<u32> {
    filters.get(CHILD_FILTER)?.parse().ok()
}

/// Add children from `items` not seen before, in first-seen order. Children
/// stay in `seen` after a filter hides their rows. Returns true if any were
/// added.
pub fn remember_children(seen: &mut Vec<(u32, String)>, items: &[Installment]) -> bool {
    let before = seen.len();
    for item in items {
        if !seen.iter().any(|(id, _)| *id == item.child_id) {
            seen.push((item.child_id, item.child_name.clone()));
        }
    }
    seen.len() != before
}

/// Label for the toolbar's filter button
pub fn filter_summary(filters: &Filters) -> String {
    let active = [STATUS_FILTER, CHILD_FILTER]
        .iter()
        .filter(|k| filters.contains_key(**k))
        .count();
    match active {
        0 => "Filter".to_string(),
        n => format!("Filter ({})", n),
    }
}

#[component]
pub fn InstallmentFilterSheet(
    #[prop(into)] visible: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] current: Signal<Filters>,
    #[prop(into)] child_options: Signal<Vec<(u32, String)>>,
    #[prop(into)] on_apply: Callback<Filters>,
) -> impl IntoView {
    let (status, set_status) = signal::<Option<InstallmentStatus>>(None);
    let (child, set_child) = signal::<Option<u32>>(None);

    // Start each opening from the filters the list is actually using
    Effect::new(move |_| {
        if visible.get() {
            let filters = current.get_untracked();
            set_status.set(parse_status(&filters));
            set_child.set(parse_child(&filters));
        }
    });

    let config = SheetConfig {
        height: SheetHeight::Fixed(360.0),
        ..SheetConfig::default()
    };

    view! {
        <BottomSheet visible=visible on_close=on_close title="Filter installments" config=config>
            <div class="filter-group">
                <h4>"Status"</h4>
                <div class="chip-row">
                    <button class="chip" class:active=move || status.get().is_none() on:click=move |_| set_status.set(None)>
                        "All"
                    </button>
                    {InstallmentStatus::ALL
                        .into_iter()
                        .map(|s| {
                            view! {
                                <button
                                    class="chip"
                                    class:active=move || status.get() == Some(s)
                                    on:click=move |_| set_status.set(Some(s))
                                >
                                    {s.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
            <div class="filter-group">
                <h4>"Child"</h4>
                <div class="chip-row">
                    <button class="chip" class:active=move || child.get().is_none() on:click=move |_| set_child.set(None)>
                        "All"
                    </button>
                    <For each=move || child_options.get() key=|(id, _)| *id let:option>
                        {
                            let (id, name) = option;
                            view! {
                                <button
                                    class="chip"
                                    class:active=move || child.get() == Some(id)
                                    on:click=move |_| set_child.set(Some(id))
                                >
                                    {name}
                                </button>
                            }
                        }
                    </For>
                </div>
            </div>
            <div class="sheet-actions">
                <button
                    class="secondary"
                    on:click=move |_| {
                        set_status.set(None);
                        set_child.set(None);
                    }
                >
                    "Clear"
                </button>
                <button
                    class="primary"
                    on:click=move |_| {
                        on_apply.run(installment_filters(status.get_untracked(), child.get_untracked()));
                        on_close.run(());
                    }
                >
                    "Apply"
                </button>
            </div>
        </BottomSheet>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn installment(id: u32, child_id: u32, child_name: &str) -> Installment {
        Installment {
            id,
            child_id,
            child_name: child_name.to_string(),
            school_name: "Northside".to_string(),
            label: format!("Term {}", id),
            amount: 100.0,
            due_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            status: InstallmentStatus::Unpaid,
        }
    }

    #[test]
    fn test_filters_round_trip_through_map() {
        let filters = installment_filters(Some(InstallmentStatus::Overdue), Some(12));
        assert_eq!(filters.get("status").map(String::as_str), Some("overdue"));
        assert_eq!(filters.get("childId").map(String::as_str), Some("12"));
        assert_eq!(parse_status(&filters), Some(InstallmentStatus::Overdue));
        assert_eq!(parse_child(&filters), Some(12));
        assert_eq!(filter_summary(&filters), "Filter (2)");

        let none = installment_filters(None, None);
        assert!(none.is_empty());
        assert_eq!(filter_summary(&none), "Filter");
    }

    #[test]
    fn test_remember_children_dedups_in_order() {
        let mut seen = Vec::new();
        let items = vec![installment(1, 7, "Ada"), installment(2, 3, "Ben"), installment(3, 7, "Ada")];
        assert!(remember_children(&mut seen, &items));
        assert_eq!(seen, vec![(7, "Ada".to_string()), (3, "Ben".to_string())]);
    }

    #[test]
    fn test_children_survive_filtering_to_one_child() {
        let mut seen = Vec::new();
        remember_children(&mut seen, &[installment(1, 7, "Ada"), installment(2, 3, "Ben")]);

        // List now only holds Ada's rows
        assert!(!remember_children(&mut seen, &[installment(1, 7, "Ada")]));
        assert_eq!(seen, vec![(7, "Ada".to_string()), (3, "Ben".to_string())]);

        assert!(remember_children(&mut seen, &[installment(4, 9, "Cleo")]));
        assert_eq!(seen.len(), 3);
    }
}
