//! Common test utilities for integration tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use twitch_clip::twitch::{HttpClient, HttpResponse};

/// Request as seen by [`ScriptedHttp`]
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: &'static str,
    pub url: String,
    pub headers: HeaderMap,
}

/// Transport that answers requests in order from a fixed script
#[derive(Debug, Clone, Default)]
pub struct ScriptedHttp {
    replies: Arc<Mutex<VecDeque<(u16, String)>>>,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl ScriptedHttp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the next response
    pub fn reply(self, status: u16, body: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
        self
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    fn answer(&self, method: &'static str, url: &str, headers: &HeaderMap) -> anyhow::Result<HttpResponse> {
        self.seen.lock().unwrap().push(Seen {
            method,
            url: url.to_string(),
            headers: headers.clone(),
        });

        let (status, body) = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("connection refused"))?;

        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpClient for ScriptedHttp {
    async fn get_response(&self, url: &str, headers: &HeaderMap) -> anyhow::Result<HttpResponse> {
        self.answer("GET", url, headers)
    }

    async fn post_response(&self, url: &str, headers: &HeaderMap) -> anyhow::Result<HttpResponse> {
        self.answer("POST", url, headers)
    }
}

/// A clip lookup body with one clip in it
pub fn clip_body(id: &str, view_count: i64) -> String {
    format!(
        r#"{{"data":[{{
            "id":"{id}",
            "url":"https://clips.twitch.tv/{id}",
            "embed_url":"https://clips.twitch.tv/embed?clip={id}",
            "broadcaster_id":"44445592",
            "creator_id":"12826",
            "video_id":"",
            "game_id":"509658",
            "language":"en",
            "title":"Test Clip",
            "view_count":{view_count},
            "created_at":"2024-03-01T12:00:00Z",
            "thumbnail_url":"https://clips-media-assets2.twitch.tv/{id}-preview-480x272.jpg"
        }}],"pagination":{{}}}}"#
    )
}
