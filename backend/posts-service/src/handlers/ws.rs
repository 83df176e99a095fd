//! WebSocket push channel for the feed
//!
//! Clients send `{"type":"fetch_page", ...feed params}` and receive
//! `{"event":"feed_page","data":<FeedPage>}`. Every failure is delivered as an
//! `exception` event carrying the same `{kind, message}` body the HTTP surface
//! returns; the connection stays open.
//!
//! Frames are answered one at a time in arrival order. A request may carry a
//! `requestId`, which is echoed on the event that answers it.

use std::time::{Duration, Instant};

use actix::{Actor, ActorContext, ActorFutureExt, AsyncContext, StreamHandler, WrapFuture};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use error_types::{normalize, ErrorSink, EventErrorSink, EventFrame, ServiceError};
use serde::Deserialize;
use uuid::Uuid;

use crate::metrics::errors::record_emitted;
use crate::middleware::UserId;
use crate::services::{FeedPaginator, FeedQuery, PageLimits, RawFeedParams};
use crate::state::AppState;

pub const FEED_PAGE_EVENT: &str = "feed_page";

/// Inbound client events
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum FeedSocketRequest {
    #[serde(rename = "fetch_page")]
    FetchPage {
        #[serde(default, rename = "requestId")]
        request_id: Option<String>,
        #[serde(flatten)]
        params: RawFeedParams,
    },
}

/// Answer one inbound text frame.
pub async fn answer(
    paginator: &FeedPaginator,
    user_id: Uuid,
    limits: &PageLimits,
    text: &str,
) -> EventFrame {
    let request: FeedSocketRequest = match serde_json::from_str(text) {
        Ok(request) => request,
        Err(e) => {
            return exception_frame(&ServiceError::InvalidInput {
                message: "Malformed event payload".to_string(),
                source: Some(Box::new(e)),
            })
        }
    };

    match request {
        FeedSocketRequest::FetchPage { request_id, params } => {
            match fetch_page(paginator, user_id, limits, &params).await {
                Ok(frame) => frame,
                Err(err) => exception_frame(&err),
            }
            .with_request_id(request_id)
        }
    }
}

async fn fetch_page(
    paginator: &FeedPaginator,
    user_id: Uuid,
    limits: &PageLimits,
    params: &RawFeedParams,
) -> Result<EventFrame, ServiceError> {
    let query = FeedQuery::parse(params, user_id, limits)?;
    let page = paginator.fetch_page(&query).await?;
    EventFrame::new(FEED_PAGE_EVENT, &page).map_err(ServiceError::internal)
}

pub fn exception_frame(err: &ServiceError) -> EventFrame {
    let client = normalize(err);
    record_emitted("ws", client.kind);
    EventErrorSink.emit(&client)
}

struct FeedSocket {
    user_id: Uuid,
    paginator: FeedPaginator,
    limits: PageLimits,
    heartbeat_interval: Duration,
    client_timeout: Duration,
    hb: Instant,
}

impl FeedSocket {
    fn hb(&self, ctx: &mut ws::WebsocketContext<Self>) {
        let timeout = self.client_timeout;
        ctx.run_interval(self.heartbeat_interval, move |act, ctx| {
            if Instant::now().duration_since(act.hb) > timeout {
                tracing::warn!(user_id = %act.user_id, "Feed socket heartbeat failed, disconnecting");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }
}

impl Actor for FeedSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::info!(user_id = %self.user_id, "Feed socket started");
        self.hb(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::info!(user_id = %self.user_id, "Feed socket stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for FeedSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.hb = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.hb = Instant::now();
                let paginator = self.paginator.clone();
                let limits = self.limits;
                let user_id = self.user_id;
                let text = text.to_string();

                // `wait` holds back later frames until this one is answered.
                let reply = async move { answer(&paginator, user_id, &limits, &text).await }
                    .into_actor(self)
                    .map(|frame, _act, ctx: &mut ws::WebsocketContext<Self>| {
                        ctx.text(frame.to_text())
                    });
                ctx.wait(reply);
            }
            Ok(ws::Message::Binary(_)) => {
                self.hb = Instant::now();
                let frame = exception_frame(&ServiceError::invalid_input(
                    "Binary frames are not supported",
                ));
                ctx.text(frame.to_text());
            }
            Ok(ws::Message::Close(reason)) => {
                tracing::debug!(user_id = %self.user_id, ?reason, "Feed socket close received");
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(user_id = %self.user_id, error = %err, "Feed socket protocol error");
                ctx.stop();
            }
        }
    }
}

/// Upgrade to the feed push channel
pub async fn feed_socket(
    req: HttpRequest,
    stream: web::Payload,
    user_id: UserId,
    state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let socket = FeedSocket {
        user_id: user_id.0,
        paginator: state.feed.clone(),
        limits: state.page_limits,
        heartbeat_interval: Duration::from_secs(state.websocket.heartbeat_interval_secs),
        client_timeout: Duration::from_secs(state.websocket.client_timeout_secs),
        hb: Instant::now(),
    };

    ws::start(socket, &req, stream)
}
