#![allow(clippy::unwrap_used)]
// Integration tests for `RestClient` using wiremock.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use parkly_api::models::{NewOccupancy, NewPayment};
use parkly_api::{Credentials, Error, RestClient, TariffFilter, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RestClient) {
    let server = MockServer::start().await;
    let client = RestClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Auth headers ────────────────────────────────────────────────────

#[tokio::test]
async fn test_credentials_are_sent_on_every_request() {
    let server = MockServer::start().await;
    let creds = Credentials::ApiKey {
        key: "service-key".to_string().into(),
    };
    let client = RestClient::new(&server.uri(), &creds, &TransportConfig::default()).unwrap();

    Mock::given(method("GET"))
        .and(path("/rest/v1/estacionamientos"))
        .and(header("apikey", "service-key"))
        .and(header("authorization", "Bearer service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "est_id": 1, "est_nombre": "Centro" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let lots = client.list_lots().await.unwrap();
    assert_eq!(lots.len(), 1);
    assert_eq!(lots[0].est_nombre, "Centro");
    assert!(lots[0].est_direccion.is_none());
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid API key" })),
        )
        .mount(&server)
        .await;

    let result = client.list_lots().await;
    match result {
        Err(Error::Authentication { ref message }) => assert!(message.contains("Invalid API key")),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_expired_jwt_maps_to_token_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "code": "PGRST301", "message": "JWT expired" })),
        )
        .mount(&server)
        .await;

    assert!(matches!(client.list_lots().await, Err(Error::TokenExpired)));
}

// ── Tariffs ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_tariffs_encodes_filters_and_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/tarifas"))
        .and(query_param("est_id", "eq.7"))
        .and(query_param("plantilla_id", "eq.3"))
        .and(query_param("tiptar_nro", "eq.1"))
        .and(query_param("order", "tar_f_desde.desc,tar_id.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "tar_id": 12,
                "est_id": 7,
                "plantilla_id": 3,
                "tiptar_nro": 1,
                "tar_precio": 1500.5,
                "tar_f_desde": "2024-06-01T00:00:00+00:00"
            }
        ])))
        .mount(&server)
        .await;

    let rows = client
        .list_tariffs(
            7,
            &TariffFilter {
                template_id: Some(3),
                segment: None,
                period_code: Some(1),
            },
        )
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tar_precio, Decimal::new(15005, 1));
    assert_eq!(
        rows[0].tar_f_desde,
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    );
    assert!(rows[0].catv_segmento.is_none());
}

// ── Occupancy ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_open_occupancies_filters_null_exit() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/ocupacion"))
        .and(query_param("est_id", "eq.1"))
        .and(query_param("ocu_fh_salida", "is.null"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "ocu_id": 40,
                "est_id": 1,
                "pla_numero": 2,
                "veh_patente": "AB123CD",
                "ocu_fh_entrada": "2024-06-15T10:30:00Z",
                "ocu_fh_salida": null
            }
        ])))
        .mount(&server)
        .await;

    let open = client.list_open_occupancies(1).await.unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].pla_numero, 2);
    assert!(open[0].ocu_fh_salida.is_none());
    assert!(open[0].pag_nro.is_none());
}

#[tokio::test]
async fn test_insert_occupancy_asks_for_representation() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/ocupacion"))
        .and(header("prefer", "return=representation"))
        .and(body_partial_json(json!({ "veh_patente": "AB123CD", "pla_numero": 4 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            {
                "ocu_id": 41,
                "est_id": 1,
                "pla_numero": 4,
                "veh_patente": "AB123CD",
                "ocu_fh_entrada": "2024-06-15T10:30:00Z",
                "tiptar_nro": 1
            }
        ])))
        .mount(&server)
        .await;

    let row = client
        .insert_occupancy(&NewOccupancy {
            est_id: 1,
            pla_numero: 4,
            veh_patente: "AB123CD".into(),
            ocu_fh_entrada: Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap(),
            tiptar_nro: 1,
        })
        .await
        .unwrap();

    assert_eq!(row.ocu_id, 41);
    assert_eq!(row.tiptar_nro, Some(1));
}

#[tokio::test]
async fn test_close_occupancy_twice_is_empty_result() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/ocupacion"))
        .and(query_param("ocu_id", "eq.41"))
        .and(query_param("ocu_fh_salida", "is.null"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let exit = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let result = client.close_occupancy(41, exit).await;
    match result {
        Err(ref e @ Error::EmptyResult { ref table }) => {
            assert_eq!(table, "ocupacion");
            assert!(e.is_not_found());
        }
        other => panic!("expected EmptyResult, got: {other:?}"),
    }
}

// ── Payments ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_insert_payment_serializes_amount() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/pagos"))
        .and(body_partial_json(json!({ "mepa_metodo": "efectivo", "pag_monto": "3000" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            {
                "pag_nro": 900,
                "est_id": 1,
                "pag_monto": 3000,
                "pag_fh": "2024-06-15T12:00:00Z",
                "mepa_metodo": "efectivo",
                "veh_patente": "AB123CD"
            }
        ])))
        .mount(&server)
        .await;

    let row = client
        .insert_payment(&NewPayment {
            est_id: 1,
            pag_monto: Decimal::from(3000),
            pag_fh: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
            mepa_metodo: "efectivo".into(),
            veh_patente: Some("AB123CD".into()),
        })
        .await
        .unwrap();

    assert_eq!(row.pag_nro, 900);
    assert_eq!(row.pag_monto, Decimal::from(3000));
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unique_violation_is_conflict() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/ocupacion"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint \"ocupacion_abierta_unq\"",
            "details": "Key (est_id, pla_numero)=(1, 4) already exists.",
            "hint": null
        })))
        .mount(&server)
        .await;

    let err = client
        .insert_occupancy(&NewOccupancy {
            est_id: 1,
            pla_numero: 4,
            veh_patente: "ZZ999ZZ".into(),
            ocu_fh_entrada: Utc::now(),
            tiptar_nro: 1,
        })
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    match err {
        Error::Api {
            status, details, ..
        } => {
            assert_eq!(status, 409);
            assert!(details.unwrap().contains("already exists"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limited_reads_retry_after() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
        .mount(&server)
        .await;

    match client.list_spaces(1).await {
        Err(Error::RateLimited { retry_after_secs }) => assert_eq!(retry_after_secs, 12),
        other => panic!("expected RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/plazas"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    match client.list_spaces(1).await {
        Err(Error::Deserialization { body, .. }) => assert_eq!(body, "{not json"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
