use contracts::usecases::u501_import_shipments::Cell;
use wasm_bindgen::prelude::*;

/// SheetJS bridge defined in index.html: first sheet as an array of rows
/// (`header: 1, raw: true`), so dates stay serial numbers.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = parseExcelFile, catch)]
    pub fn parse_excel_file(data: &[u8]) -> Result<JsValue, JsValue>;
}

/// Read an `.xlsx`/`.xls` file into typed cells
pub async fn read_sheet_from_file(file: web_sys::File) -> Result<Vec<Vec<Cell>>, String> {
    use wasm_bindgen_futures::JsFuture;

    let array_buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Erro ao ler o arquivo: {:?}", e))?;

    let uint8_array = js_sys::Uint8Array::new(&array_buffer);
    let mut bytes = vec![0; uint8_array.length() as usize];
    uint8_array.copy_to(&mut bytes);

    let result = parse_excel_file(&bytes).map_err(|e| {
        log::error!("SheetJS failed: {:?}", e);
        "Arquivo não reconhecido como planilha".to_string()
    })?;

    rows_from_js(result)
}

fn cell_from_js(value: &JsValue) -> Cell {
    if let Some(n) = value.as_f64() {
        Cell::Number(n)
    } else if let Some(s) = value.as_string() {
        Cell::Text(s)
    } else if let Some(b) = value.as_bool() {
        Cell::Bool(b)
    } else {
        Cell::Empty
    }
}

fn rows_from_js(js_value: JsValue) -> Result<Vec<Vec<Cell>>, String> {
    if !js_value.is_array() {
        return Err("Resultado da leitura não é uma lista de linhas".to_string());
    }

    let array = js_sys::Array::from(&js_value);
    let mut rows = Vec::with_capacity(array.length() as usize);
    for i in 0..array.length() {
        let row_value = array.get(i);
        if !row_value.is_array() {
            rows.push(Vec::new());
            continue;
        }
        let row_array = js_sys::Array::from(&row_value);
        rows.push(row_array.iter().map(|cell| cell_from_js(&cell)).collect());
    }
    Ok(rows)
}
