//! Bar Chart Component
//!
//! Horizontal CSS bars scaled to the largest bucket.

use leptos::prelude::*;

use crate::billing::format_amount;
use crate::reports::{bar_percent, max_value, Bucket};

#[component]
pub fn BarChart(
    #[prop(into)] title: String,
    #[prop(into)] buckets: Signal<Vec<Bucket>>,
) -> impl IntoView {
    view! {
        <div class="card chart-card">
            <div class="card-header">
                <h2 class="card-title">{title}</h2>
            </div>
            {move || {
                let buckets = buckets.get();
                if buckets.is_empty() {
                    return view! { <p class="empty">"No data for this period."</p> }.into_any();
                }
                let max = max_value(&buckets);
                view! {
                    <div class="bar-chart">
                        {buckets.into_iter().map(|bucket| {
                            let width = bar_percent(bucket.value, max);
                            view! {
                                <div class="bar-row">
                                    <span class="bar-label">{bucket.label}</span>
                                    <div class="progress-bar">
                                        <div class="progress-bar-fill" style=format!("width: {:.1}%", width)></div>
                                    </div>
                                    <span class="bar-value">{format_amount(bucket.value)}</span>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }.into_any()
            }}
        </div>
    }
}
