use serde_json::{json, Value};

use crate::error::{GenerationError, Result};
use crate::models::GenerationRequest;

/// Field names the model must return, in the order they are requested.
pub const DESCRIPTION_FIELDS: [&str; 4] = ["title", "longDescription", "shortDescription", "tags"];

/// What gets sent to the model: the instruction text and the schema it is asked to honor.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPayload {
    pub product_name: String,
    pub keywords: String,
    pub instruction: String,
    pub response_schema: Value,
}

pub fn build_payload(request: &GenerationRequest) -> Result<GenerationPayload> {
    let product = request.product_name();
    if product.is_empty() {
        return Err(GenerationError::InvalidInput("product name is empty".into()));
    }
    let keywords = request.keywords();

    let hints = if keywords.trim().is_empty() {
        "Palabras clave: ninguna (usa solo el nombre del producto).".to_string()
    } else {
        format!("Palabras clave: {keywords}")
    };

    let instruction = format!(
        "Actúa como un copywriter experto en e-commerce para tiendas de Tiendanube. \
        Escribe en español neutro, con un tono cercano, persuasivo y profesional, pensado para compradores online de Latinoamérica.\n\n\
        Producto: {product}\n\
        {hints}\n\n\
        Devuelve un objeto JSON con exactamente estos campos:\n\
        - title: un título atractivo y optimizado para SEO (máximo 70 caracteres).\n\
        - longDescription: una descripción detallada de 2 a 3 párrafos que destaque beneficios, características y usos.\n\
        - shortDescription: un resumen de una o dos oraciones para listados y redes sociales.\n\
        - tags: una lista de 5 a 8 etiquetas cortas relevantes para búsquedas."
    );

    Ok(GenerationPayload {
        product_name: product.to_string(),
        keywords: keywords.to_string(),
        instruction,
        response_schema: description_schema(),
    })
}

/// Object schema in the OpenAPI subset Gemini accepts for `responseSchema`.
pub fn description_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "Título del producto optimizado para SEO."
            },
            "longDescription": {
                "type": "STRING",
                "description": "Descripción detallada del producto."
            },
            "shortDescription": {
                "type": "STRING",
                "description": "Resumen breve del producto."
            },
            "tags": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Etiquetas de búsqueda."
            }
        },
        "required": DESCRIPTION_FIELDS,
        "propertyOrdering": DESCRIPTION_FIELDS
    })
}
