use std::env;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, post, web};
use serde::{Deserialize, Serialize};

use rs_reply_core::{EngineConfig, ReplyEngine};

/// Address used when `REPLY_BIND` is not set.
const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Body of `POST /v1/complete`
#[derive(Serialize, Deserialize)]
struct CompleteRequest {
	#[serde(default)]
	prompt: String,
	model: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct CompleteResponse {
	reply: String,
}

/// Availability of the runtime artifacts
#[derive(Serialize, Deserialize)]
struct ArtifactsResponse {
	markov: bool,
	knowledge: bool,
}

/// HTTP POST endpoint `/v1/complete`
///
/// Produces a reply for the prompt of the JSON body. The optional `model`
/// field is the model hint (`"markov"` pins the local pipeline).
#[post("/v1/complete")]
async fn post_complete(engine: web::Data<ReplyEngine>, body: web::Json<CompleteRequest>) -> impl Responder {
	let CompleteRequest { prompt, model } = body.into_inner();
	if prompt.trim().is_empty() {
		return HttpResponse::BadRequest().body("Prompt is required");
	}

	// Artifact loading and the service call block
	match web::block(move || engine.generate_reply(&prompt, model.as_deref())).await {
		Ok(reply) => HttpResponse::Ok().json(CompleteResponse { reply }),
		Err(e) => {
			log::error!("Reply generation failed: {e}");
			HttpResponse::InternalServerError().body("Reply generation failed")
		}
	}
}

/// HTTP GET endpoint `/v1/artifacts`
///
/// Loads the artifacts if needed and reports which ones are usable.
#[get("/v1/artifacts")]
async fn get_artifacts(engine: web::Data<ReplyEngine>) -> impl Responder {
	let loaded = web::block(move || {
		let store = engine.store();
		ArtifactsResponse {
			markov: store.markov().is_some(),
			knowledge: store.knowledge().is_some(),
		}
	})
	.await;

	match loaded {
		Ok(artifacts) => HttpResponse::Ok().json(artifacts),
		Err(e) => {
			log::error!("Artifact check failed: {e}");
			HttpResponse::InternalServerError().body("Artifact check failed")
		}
	}
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(post_complete).service(get_artifacts);
}

/// Main entry point for the server.
///
/// Builds the engine from the environment, shares it between workers and
/// starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to `REPLY_BIND` (default 127.0.0.1:5000).
/// - The engine holds a blocking HTTP client, so it is created and dropped
///   outside the async runtime.
fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = EngineConfig::from_env();
	let engine = web::Data::new(ReplyEngine::new(&config));
	let bind = env::var("REPLY_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_owned());
	log::info!("Listening on {bind}");

	actix_web::rt::System::new().block_on(async move {
		HttpServer::new(move || {
			App::new()
				.wrap(Cors::permissive())
				.app_data(engine.clone())
				.configure(routes)
		})
		.bind(bind.as_str())?
		.run()
		.await
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test::{TestRequest, call_and_read_body_json, call_service, init_service, read_body};

	/// Engine with no artifacts on disk and no generation service.
	fn offline_engine() -> web::Data<ReplyEngine> {
		let config = EngineConfig {
			model_path: "missing/markov.model.json".into(),
			knowledge_path: "missing/knowledge.corpus.json".into(),
			ollama_url: String::new(),
			..EngineConfig::default()
		};
		web::Data::new(ReplyEngine::new(&config))
	}

	#[test]
	fn complete_returns_a_reply() {
		let engine = offline_engine();
		actix_web::rt::System::new().block_on(async {
			let app = init_service(App::new().app_data(engine.clone()).configure(routes)).await;
			let req = TestRequest::post()
				.uri("/v1/complete")
				.set_json(CompleteRequest {
					prompt: "Who made you?".to_owned(),
					model: Some("markov".to_owned()),
				})
				.to_request();
			let resp: CompleteResponse = call_and_read_body_json(&app, req).await;
			assert_eq!(resp.reply, "I was created by the OpVenTech team.");
		});
	}

	#[test]
	fn blank_prompt_is_rejected() {
		let engine = offline_engine();
		actix_web::rt::System::new().block_on(async {
			let app = init_service(App::new().app_data(engine.clone()).configure(routes)).await;
			for body in [r#"{"prompt":"   "}"#, "{}"] {
				let req = TestRequest::post()
					.uri("/v1/complete")
					.insert_header(("content-type", "application/json"))
					.set_payload(body)
					.to_request();
				let resp = call_service(&app, req).await;
				assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
				assert_eq!(read_body(resp).await, web::Bytes::from_static(b"Prompt is required"));
			}
		});
	}

	#[test]
	fn artifacts_report_missing_files() {
		let engine = offline_engine();
		actix_web::rt::System::new().block_on(async {
			let app = init_service(App::new().app_data(engine.clone()).configure(routes)).await;
			let req = TestRequest::get().uri("/v1/artifacts").to_request();
			let resp: ArtifactsResponse = call_and_read_body_json(&app, req).await;
			assert!(!resp.markov);
			assert!(!resp.knowledge);
		});
	}
}
