use serde::{Deserialize, Serialize};

pub const DEFAULT_QUERY_LIMIT: u32 = 20;
pub const QUERY_ROUTE: &str = "/api/v1/query";

/// Body of a query against the event recommendation service.
///
/// Wire names are the upstream service's and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(rename = "pregunta")]
    pub question: String,
    #[serde(rename = "cp_usuario")]
    pub postal_code: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub debug: bool,
}

fn default_limit() -> u32 {
    DEFAULT_QUERY_LIMIT
}

impl QueryRequest {
    pub fn new(question: impl Into<String>, postal_code: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            postal_code: postal_code.into(),
            limit: DEFAULT_QUERY_LIMIT,
            debug: false,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(rename = "respuesta_texto")]
    pub response_text: String,
    #[serde(rename = "eventos", default)]
    pub events: Vec<EventRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "id_unico_evento")]
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion_corta")]
    pub short_description: String,
    #[serde(rename = "descripcion_larga")]
    pub long_description: String,
    #[serde(rename = "cp_evento")]
    pub postal_code: String,
    #[serde(rename = "poblacion_nombre")]
    pub town_name: String,
    #[serde(rename = "lugar_nombre")]
    pub place_name: String,
    #[serde(rename = "direccion_completa")]
    pub full_address: String,
    #[serde(rename = "fecha_inicio")]
    pub start_date: String,
    #[serde(rename = "fecha_fin")]
    pub end_date: String,
    #[serde(rename = "hora_inicio")]
    pub start_time: String,
    #[serde(rename = "hora_fin")]
    pub end_time: String,
    #[serde(rename = "es_gratuito")]
    pub is_free: bool,
    #[serde(rename = "precio_euros")]
    pub price_eur: Option<f64>,
    #[serde(rename = "categorias", default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "url_evento")]
    pub url: Option<String>,
    #[serde(rename = "url_imagen")]
    pub image_url: Option<String>,
    #[serde(rename = "distancia_km")]
    pub distance_km: Option<f64>,
    #[serde(rename = "similitud_score")]
    pub similarity_score: f64,
    #[serde(rename = "nivel_coincidencia")]
    pub match_level: String,
}

/// Error body returned by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayErrorBody {
    pub error: String,
}

impl RelayErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_upstream_field_names() {
        let body = serde_json::to_value(QueryRequest::new("conciertos", "08001")).expect("json");
        assert_eq!(
            body,
            serde_json::json!({
                "pregunta": "conciertos",
                "cp_usuario": "08001",
                "limit": 20,
                "debug": false,
            })
        );
    }

    #[test]
    fn request_defaults_limit_and_debug_when_missing() {
        let req: QueryRequest =
            serde_json::from_str(r#"{"pregunta":"hola","cp_usuario":"08380"}"#).expect("json");
        assert_eq!(req.limit, DEFAULT_QUERY_LIMIT);
        assert!(!req.debug);
    }

    #[test]
    fn response_parses_nullable_event_fields() {
        let raw = serde_json::json!({
            "respuesta_texto": "He encontrado un evento.",
            "eventos": [{
                "id_unico_evento": "evt-1",
                "titulo": "Mercat de pagès",
                "descripcion_corta": "Producte local",
                "descripcion_larga": "Mercat setmanal de producte local.",
                "cp_evento": "08001",
                "poblacion_nombre": "Barcelona",
                "lugar_nombre": "Plaça Reial",
                "direccion_completa": "Plaça Reial, 08002 Barcelona",
                "fecha_inicio": "2026-03-14",
                "fecha_fin": "2026-03-14",
                "hora_inicio": "10:00:00",
                "hora_fin": "14:00:00",
                "es_gratuito": true,
                "precio_euros": null,
                "categorias": ["mercado"],
                "tags": ["#local"],
                "url_evento": null,
                "url_imagen": null,
                "distancia_km": 0.4,
                "similitud_score": 0.91,
                "nivel_coincidencia": "alta"
            }]
        });
        let response: QueryResponse = serde_json::from_value(raw).expect("parse");
        assert_eq!(response.events.len(), 1);
        let event = &response.events[0];
        assert!(event.is_free);
        assert_eq!(event.price_eur, None);
        assert_eq!(event.distance_km, Some(0.4));
        assert_eq!(event.place_name, "Plaça Reial");
    }

    #[test]
    fn response_without_events_is_empty_list() {
        let response: QueryResponse =
            serde_json::from_str(r#"{"respuesta_texto":"Nada por ahora."}"#).expect("parse");
        assert!(response.events.is_empty());
    }
}
