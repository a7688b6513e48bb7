//! Bottom Sheet Component
//!
//! Hosts modal content (filters, cart review, payment confirmation) in a
//! draggable sheet. Controlled by `visible`; `on_close` fires once the
//! close animation has finished, however the close was triggered.

use leptos::prelude::*;
use leptos_sheet::{bind_global_pointer, create_sheet, make_on_pointerdown, SheetConfig, SheetEvent};

#[component]
pub fn BottomSheet(
    #[prop(into)] visible: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional)] config: Option<SheetConfig>,
    children: ChildrenFn,
) -> impl IntoView {
    let sheet = create_sheet(
        config.unwrap_or_default(),
        Callback::new(move |event: SheetEvent| {
            if event == SheetEvent::Closed {
                on_close.run(());
            }
        }),
    );
    bind_global_pointer(sheet);

    // Follow the host's visibility flag
    Effect::new(move |_| {
        if visible.get() {
            sheet.open();
        } else {
            sheet.close();
        }
    });

    let on_pointerdown = make_on_pointerdown(sheet);
    let title = title.unwrap_or_default();

    view! {
        <Show when=move || sheet.is_visible()>
            <div class="sheet-root">
                <div
                    class="sheet-backdrop"
                    style:opacity=move || sheet.backdrop_opacity().to_string()
                    on:click=move |_| sheet.backdrop_press()
                ></div>
                <div
                    class="sheet-panel"
                    class:dragging=move || sheet.is_dragging()
                    class:expanded=move || sheet.is_expanded()
                    style:top=move || format!("{}px", sheet.collapsed_top())
                    style:height=move || format!("{}px", sheet.panel_height())
                    style:transform=move || format!("translateY({}px)", sheet.offset())
                >
                    <div class="sheet-handle" on:pointerdown=on_pointerdown>
                        <div class="sheet-grip"></div>
                        <div class="sheet-title-row">
                            <span class="sheet-title">{title.clone()}</span>
                            <Show when=move || sheet.can_expand()>
                                <button
                                    class="sheet-toggle"
                                    on:pointerdown=|ev| ev.stop_propagation()
                                    on:click=move |_| {
                                        if sheet.is_expanded() {
                                            sheet.collapse();
                                        } else {
                                            sheet.expand();
                                        }
                                    }
                                >
                                    {move || if sheet.is_expanded() { "Less" } else { "More" }}
                                </button>
                            </Show>
                            <button
                                class="sheet-close"
                                on:pointerdown=|ev| ev.stop_propagation()
                                on:click=move |_| sheet.close()
                            >
                                "×"
                            </button>
                        </div>
                    </div>
                    <div class="sheet-content">{children()}</div>
                </div>
            </div>
        </Show>
    }
}
