use std::cmp::Ordering;

use contracts::domain::a001_shipment::ShipmentRecord;
use contracts::shared::date_utils::format_date_br;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::export::download_csv;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::system::auth::context::use_auth;

/// Table columns: sort key and header
const COLUMNS: &[(&str, &str)] = &[
    ("bl_awb", "BL/AWB"),
    ("status", "Status"),
    ("mode", "Modal"),
    ("fcl", "Cntr"),
    ("terminal", "Terminal"),
    ("incoterm", "Incoterm"),
    ("eta", "ETA"),
    ("di_number", "DI"),
    ("di_registration_date", "Registro DI"),
    ("clearance_date", "Desembaraço"),
    ("channel", "Canal"),
    ("supplier", "Fornecedor"),
];

fn date_key(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Ordering of two records on a table column
pub fn compare_by_field(a: &ShipmentRecord, b: &ShipmentRecord, field: &str) -> Ordering {
    match field {
        "bl_awb" => a.bl_awb.cmp(&b.bl_awb),
        "status" => a.status.cmp(&b.status),
        "mode" => a.mode.cmp(&b.mode),
        "fcl" => a.fcl.cmp(&b.fcl),
        "terminal" => a.terminal.cmp(&b.terminal),
        "incoterm" => a.incoterm.cmp(&b.incoterm),
        "eta" => date_key(&a.eta).cmp(&date_key(&b.eta)),
        "di_number" => a.di_number.cmp(&b.di_number),
        "di_registration_date" => {
            date_key(&a.di_registration_date).cmp(&date_key(&b.di_registration_date))
        }
        "clearance_date" => date_key(&a.clearance_date).cmp(&date_key(&b.clearance_date)),
        "channel" => a.channel.cmp(&b.channel),
        "supplier" => a.supplier.cmp(&b.supplier),
        _ => Ordering::Equal,
    }
}

/// Case-insensitive match on reference, DI, supplier and vessel
pub fn matches_search(record: &ShipmentRecord, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    [
        Some(record.bl_awb.as_str()),
        record.di_number.as_deref(),
        record.supplier.as_deref(),
        record.vessel.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|v| v.to_lowercase().contains(&query))
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn date(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(format_date_br)
        .unwrap_or_else(|| "-".to_string())
}

/// Sortable shipment table
#[component]
pub fn ShipmentTable(#[prop(into)] records: Signal<Vec<ShipmentRecord>>) -> impl IntoView {
    let (sort_field, set_sort_field) = signal("eta".to_string());
    let (sort_ascending, set_sort_ascending) = signal(true);

    let sorted = Memo::new(move |_| {
        let field = sort_field.get();
        let ascending = sort_ascending.get();
        let mut rows = records.get();
        rows.sort_by(|a, b| {
            let ord = compare_by_field(a, b, &field);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        rows
    });

    let toggle_sort = move |field: &'static str| {
        if sort_field.get_untracked() == field {
            set_sort_ascending.update(|asc| *asc = !*asc);
        } else {
            set_sort_field.set(field.to_string());
            set_sort_ascending.set(true);
        }
    };

    view! {
        <div class="table-wrapper">
            <table class="data-table">
                <thead>
                    <tr>
                        {COLUMNS
                            .iter()
                            .map(|(field, header)| {
                                let field = *field;
                                let indicator = move || {
                                    if sort_field.get() != field {
                                        ""
                                    } else if sort_ascending.get() {
                                        " ▲"
                                    } else {
                                        " ▼"
                                    }
                                };
                                view! {
                                    <th class="data-table__th--sortable" on:click=move |_| toggle_sort(field)>
                                        {*header}
                                        {indicator}
                                    </th>
                                }
                            })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || sorted.get()
                        key=|r| r.id.clone()
                        children=move |r| {
                            view! {
                                <tr>
                                    <td class="data-table__ref">{r.bl_awb.clone()}</td>
                                    <td>{text(&r.status)}</td>
                                    <td>{text(&r.mode)}</td>
                                    <td class="data-table__num">{r.container_count().to_string()}</td>
                                    <td>{text(&r.terminal)}</td>
                                    <td>{text(&r.incoterm)}</td>
                                    <td>{date(&r.eta)}</td>
                                    <td>{text(&r.di_number)}</td>
                                    <td>{date(&r.di_registration_date)}</td>
                                    <td>{date(&r.clearance_date)}</td>
                                    <td>{text(&r.channel)}</td>
                                    <td>{text(&r.supplier)}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            {move || {
                sorted
                    .with(|rows| rows.is_empty())
                    .then(|| view! { <div class="data-table__empty">"Nenhum embarque"</div> })
            }}
        </div>
    }
}

/// Full shipment list with search and CSV export
#[component]
pub fn ShipmentsPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();
    let (search, set_search) = signal(String::new());
    let (exporting, set_exporting) = signal(false);
    let (export_error, set_export_error) = signal(None::<String>);

    let rows = Signal::derive(move || {
        let query = search.get();
        ctx.state.with(|s| {
            s.filtered()
                .into_iter()
                .filter(|r| matches_search(r, &query))
                .cloned()
                .collect::<Vec<_>>()
        })
    });
    let count = move || rows.with(|r| r.len());

    let on_export = move |_| {
        let Some(token) = auth_state.with_untracked(|s| s.access_token.clone()) else {
            return;
        };
        set_exporting.set(true);
        set_export_error.set(None);
        spawn_local(async move {
            let result = api::export_csv(&token)
                .await
                .and_then(|csv| download_csv(&csv, "embarques.csv"));
            if let Err(e) = result {
                log::error!("CSV export failed: {}", e);
                set_export_error.set(Some("Não foi possível exportar os embarques.".to_string()));
            }
            set_exporting.set(false);
        });
    };

    view! {
        <PageFrame page_id="a001_shipment--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <h2 class="page__title">"Embarques"</h2>
                <div class="page__actions">
                    <input
                        class="page__search"
                        type="search"
                        placeholder="Buscar BL/AWB, DI, fornecedor..."
                        prop:value=search
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=on_export
                        disabled=Signal::derive(move || exporting.get())
                    >
                        {icon("download")}
                        " Exportar CSV"
                    </Button>
                </div>
            </div>
            <FilterPanel />
            {move || {
                export_error
                    .get()
                    .map(|e| view! { <div class="warning-box warning-box--error">{e}</div> })
            }}
            <div class="page__meta">{move || format!("{} embarques", count())}</div>
            <ShipmentTable records=rows />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(bl: &str, eta: Option<&str>) -> ShipmentRecord {
        ShipmentRecord {
            id: bl.into(),
            bl_awb: bl.into(),
            eta: eta.map(str::to_string),
            supplier: Some("Acme Ltda".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_compare_by_eta_puts_missing_first() {
        let a = record("A", Some("2024-03-01"));
        let b = record("B", None);
        assert_eq!(compare_by_field(&a, &b, "eta"), Ordering::Greater);
        assert_eq!(compare_by_field(&a, &b, "unknown"), Ordering::Equal);
    }

    #[test]
    fn test_search_matches_reference_and_supplier() {
        let r = record("MSCU123", None);
        assert!(matches_search(&r, "mscu"));
        assert!(matches_search(&r, " acme "));
        assert!(matches_search(&r, ""));
        assert!(!matches_search(&r, "maersk"));
    }
}
