use contracts::usecases::u501_import_shipments::{
    map_sheet, ImportBatchRequest, ImportBatchResponse, ImportOutcome,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

use super::parser::read_sheet_from_file;
use crate::domain::a001_shipment::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use crate::system::auth::context::use_auth;

const ACCEPTED_EXTENSIONS: [&str; 2] = [".xlsx", ".xls"];

fn is_spreadsheet(name: &str) -> bool {
    let lower = name.to_lowercase();
    ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Upload, preview and commit of a shipment spreadsheet.
///
/// The sheet is mapped in the browser; nothing is written until the user
/// confirms the preview. A committed batch reloads the dashboards.
#[component]
pub fn ShipmentUploadModal() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();

    let file_name = RwSignal::new(None::<String>);
    let parsing = RwSignal::new(false);
    let dragging = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let outcome = RwSignal::new(None::<ImportOutcome>);
    let committing = RwSignal::new(false);
    let result = RwSignal::new(None::<ImportBatchResponse>);

    let close = Callback::new(move |_: ()| {
        if !committing.get_untracked() {
            ctx.upload_open.set(false);
        }
    });

    let load_file = move |file: web_sys::File| {
        let name = file.name();
        file_name.set(Some(name.clone()));
        error.set(None);
        outcome.set(None);
        result.set(None);

        if !is_spreadsheet(&name) {
            error.set(Some("Selecione um arquivo .xlsx ou .xls".to_string()));
            return;
        }

        parsing.set(true);
        spawn_local(async move {
            match read_sheet_from_file(file).await {
                Ok(rows) => match map_sheet(&rows) {
                    Ok(mapped) => {
                        log::info!(
                            "Mapped {}: {} rows kept, {} dropped",
                            name,
                            mapped.preview.kept_rows,
                            mapped.preview.dropped_rows
                        );
                        outcome.set(Some(mapped));
                    }
                    Err(e) => error.set(Some(e.to_string())),
                },
                Err(e) => error.set(Some(e)),
            }
            parsing.set(false);
        });
    };

    let on_file_input = move |ev: leptos::ev::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            load_file(file);
        }
    };

    let on_drag_over = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        dragging.set(true);
    };
    let on_drag_leave = move |_: leptos::ev::DragEvent| dragging.set(false);
    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        dragging.set(false);
        let file = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            load_file(file);
        }
    };

    let commit = move |_| {
        let Some(mapped) = outcome.get_untracked() else {
            return;
        };
        let Some(token) = auth_state.with_untracked(|s| s.access_token.clone()) else {
            return;
        };
        let request = ImportBatchRequest {
            file_name: file_name.get_untracked(),
            rows: mapped.patches,
        };

        committing.set(true);
        error.set(None);
        spawn_local(async move {
            match api::import_batch(&token, &request).await {
                Ok(response) => {
                    log::info!(
                        "Batch committed: {} created, {} updated",
                        response.created,
                        response.updated
                    );
                    result.set(Some(response));
                    outcome.set(None);
                    ctx.reload(token);
                }
                Err(e) => error.set(Some(e)),
            }
            committing.set(false);
        });
    };

    let can_commit = Signal::derive(move || {
        !committing.get()
            && outcome.with(|o| o.as_ref().is_some_and(|o| !o.patches.is_empty()))
    });

    view! {
        <ModalFrame
            on_close=close
            locked=Signal::derive(move || committing.get())
            modal_class="upload-modal"
        >
            <div class="modal-header">
                <h3 class="modal-title">"Importar planilha de embarques"</h3>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| close.run(())
                    disabled=Signal::derive(move || committing.get())
                >
                    {icon("x")}
                </Button>
            </div>

            <div class="modal-body">
                <label
                    class=move || {
                        if dragging.get() { "dropzone dropzone--active" } else { "dropzone" }
                    }
                    on:dragover=on_drag_over
                    on:dragleave=on_drag_leave
                    on:drop=on_drop
                >
                    {icon("upload")}
                    <span class="dropzone__text">
                        {move || {
                            file_name
                                .get()
                                .unwrap_or_else(|| {
                                    "Arraste o arquivo aqui ou clique para selecionar".to_string()
                                })
                        }}
                    </span>
                    <input
                        type="file"
                        accept=".xlsx,.xls"
                        class="hidden"
                        on:change=on_file_input
                    />
                </label>

                {move || {
                    error
                        .get()
                        .map(|e| {
                            view! {
                                <div class="warning-box warning-box--error">
                                    <span class="warning-box__icon">"⚠"</span>
                                    <span class="warning-box__text">{e}</span>
                                </div>
                            }
                        })
                }}

                {move || parsing.get().then(|| view! { <div class="loading">"Lendo planilha..."</div> })}

                {move || {
                    result
                        .get()
                        .map(|r| {
                            view! {
                                <div class="info-box info-box--success">
                                    {format!(
                                        "{} embarques gravados: {} novos, {} atualizados",
                                        r.total,
                                        r.created,
                                        r.updated,
                                    )}
                                </div>
                            }
                        })
                }}

                {move || {
                    outcome
                        .get()
                        .map(|o| {
                            let preview = o.preview;
                            let mapped = preview
                                .mapped
                                .iter()
                                .map(|m| {
                                    view! {
                                        <tr>
                                            <td>{m.header.clone()}</td>
                                            <td>{m.field.label()}</td>
                                        </tr>
                                    }
                                })
                                .collect_view();
                            let unmatched = (!preview.unmatched_headers.is_empty())
                                .then(|| {
                                    view! {
                                        <div class="upload-preview__unmatched">
                                            "Colunas ignoradas: "
                                            {preview.unmatched_headers.join(", ")}
                                        </div>
                                    }
                                });
                            view! {
                                <div class="upload-preview">
                                    <div class="upload-preview__counts">
                                        <span>{format!("{} linhas válidas", preview.kept_rows)}</span>
                                        <span>
                                            {format!("{} linhas sem BL/AWB descartadas", preview.dropped_rows)}
                                        </span>
                                    </div>
                                    <table class="data-table data-table--compact">
                                        <thead>
                                            <tr>
                                                <th>"Coluna da planilha"</th>
                                                <th>"Campo"</th>
                                            </tr>
                                        </thead>
                                        <tbody>{mapped}</tbody>
                                    </table>
                                    {unmatched}
                                </div>
                            }
                        })
                }}
            </div>

            <div class="modal-footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| close.run(())
                    disabled=Signal::derive(move || committing.get())
                >
                    "Fechar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=commit
                    disabled=Signal::derive(move || !can_commit.get())
                >
                    {move || if committing.get() { "Gravando..." } else { "Confirmar importação" }}
                </Button>
            </div>
        </ModalFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_spreadsheet_extensions_only() {
        assert!(is_spreadsheet("Embarques 2024.XLSX"));
        assert!(is_spreadsheet("legado.xls"));
        assert!(!is_spreadsheet("embarques.csv"));
        assert!(!is_spreadsheet("xlsx"));
    }
}
