//! Installment Payment Confirmation Sheet

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_sheet::{SheetConfig, SheetHeight};

use super::BottomSheet;
use crate::checkout::{pay_installment, TauriGateway};
use crate::error::AppError;
use crate::models::{format_amount, Installment};
use crate::store::{store_notify, store_payment_succeeded, use_app_store};

#[component]
pub fn PaymentSheet(
    #[prop(into)] visible: Signal<bool>,
    #[prop(into)] installment: Signal<Option<Installment>>,
    #[prop(into)] on_close: Callback<()>,
    /// Runs after the server accepted the payment
    #[prop(into)]
    on_paid: Callback<()>,
) -> impl IntoView {
    let store = use_app_store();
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        if visible.get() {
            set_error.set(None);
        }
    });

    let pay = move |_| {
        let Some(target) = installment.get_untracked() else {
            return;
        };
        if submitting.get_untracked() {
            return;
        }
        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            let outcome = pay_installment(&target, &TauriGateway).await;
            set_submitting.set(false);
            match outcome {
                Ok(receipt) => {
                    log::info!("[pay] installment {} paid: {}", target.id, receipt.reference);
                    store_payment_succeeded(&store, receipt, &[]);
                    on_paid.run(());
                    on_close.run(());
                }
                Err(AppError::TerminalPayment(message)) => {
                    log::warn!("[pay] installment {} rejected: {}", target.id, message);
                    store_notify(&store, format!("Payment failed: {}", message));
                    on_close.run(());
                }
                Err(e) => set_error.set(Some(e.user_message())),
            }
        });
    };

    let config = SheetConfig {
        height: SheetHeight::Fixed(320.0),
        enable_drag_to_expand: false,
        ..SheetConfig::default()
    };

    view! {
        <BottomSheet visible=visible on_close=on_close title="Confirm payment" config=config>
            {move || {
                installment
                    .get()
                    .map(|i| {
                        view! {
                            <div class="payment-summary">
                                <div class="payment-child">{i.child_name.clone()}" · "{i.school_name.clone()}</div>
                                <div class="payment-label">{i.label.clone()}</div>
                                <div class="payment-due">"Due " {i.due_date.format("%d %b %Y").to_string()}</div>
                                <div class="payment-amount">{format_amount(i.amount)}</div>
                            </div>
                        }
                    })
            }}
            <Show when=move || error.get().is_some()>
                <div class="inline-error">{move || error.get().unwrap_or_default()}</div>
            </Show>
            <div class="sheet-actions">
                <button class="primary" disabled=move || submitting.get() on:click=pay>
                    {move || if submitting.get() { "Paying..." } else { "Pay now" }}
                </button>
            </div>
        </BottomSheet>
    }
}
