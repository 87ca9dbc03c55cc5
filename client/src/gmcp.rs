//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! GMCP package routing
//!
//! Routes are keyed by lower-cased dotted path. A message goes to the route
//! for its full path, then to the route for each shorter prefix
//! (`Char.Vitals` falls back to `Char`). Messages no route claims come
//! back as [`GmcpRoute::Unknown`].

use crate::SessionEvent;
use crate::format::{self, format_template};
use mudlink_telnetcodec::gmcp::GmcpMessage;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{trace, warn};

/// Handler for one GMCP package.
pub trait GmcpPackageHandler: Send {
    /// Handle `message`. `data` is its parsed JSON document, if any.
    fn handle(&mut self, message: &GmcpMessage, data: Option<&Value>) -> Option<SessionEvent>;
}

impl<F> GmcpPackageHandler for F
where
    F: FnMut(&GmcpMessage, Option<&Value>) -> Option<SessionEvent> + Send,
{
    fn handle(&mut self, message: &GmcpMessage, data: Option<&Value>) -> Option<SessionEvent> {
        self(message, data)
    }
}

/// Result of [`GmcpRouter::route`].
#[derive(Debug, PartialEq)]
pub enum GmcpRoute {
    /// A route consumed the message and optionally produced an event.
    Handled(Option<SessionEvent>),
    /// No route matched.
    Unknown(GmcpMessage),
}

/// Dispatch table from package path to handler.
#[derive(Default)]
pub struct GmcpRouter {
    routes: HashMap<String, Box<dyn GmcpPackageHandler>>,
}

impl std::fmt::Debug for GmcpRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut paths: Vec<_> = self.routes.keys().collect();
        paths.sort();
        f.debug_struct("GmcpRouter").field("routes", &paths).finish()
    }
}

impl GmcpRouter {
    /// Start an empty router.
    pub fn builder() -> GmcpRouterBuilder {
        GmcpRouterBuilder::default()
    }

    /// Router with the built in `Core.Goodbye` route.
    pub fn with_defaults() -> GmcpRouterBuilder {
        Self::builder().route("Core.Goodbye", |message: &GmcpMessage, data: Option<&Value>| {
            let reason = match data {
                Some(Value::String(text)) => text.clone(),
                _ => message.data().unwrap_or_default().to_string(),
            };
            Some(SessionEvent::Error(format_template(
                format::SERVER_GOODBYE,
                &[&reason],
                &[],
            )))
        })
    }

    /// Whether a route exists for exactly `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(&path.to_ascii_lowercase())
    }

    /// Route `message` to the most specific matching handler.
    pub fn route(&mut self, message: GmcpMessage) -> GmcpRoute {
        let mut path = message.package().to_ascii_lowercase();
        loop {
            if let Some(handler) = self.routes.get_mut(&path) {
                trace!("GMCP {} routed to {}", message.package(), path);
                let data = parse_data(&message);
                return GmcpRoute::Handled(handler.handle(&message, data.as_ref()));
            }
            match path.rfind('.') {
                Some(dot) => path.truncate(dot),
                None => return GmcpRoute::Unknown(message),
            }
        }
    }
}

/// Constructor-time route registration for [`GmcpRouter`].
#[derive(Default)]
pub struct GmcpRouterBuilder {
    routes: HashMap<String, Box<dyn GmcpPackageHandler>>,
}

impl GmcpRouterBuilder {
    /// Register `handler` for `path` and everything below it.
    pub fn route(mut self, path: &str, handler: impl GmcpPackageHandler + 'static) -> Self {
        self.routes
            .insert(path.to_ascii_lowercase(), Box::new(handler));
        self
    }

    /// Finish registration.
    pub fn build(self) -> GmcpRouter {
        GmcpRouter {
            routes: self.routes,
        }
    }
}

fn parse_data(message: &GmcpMessage) -> Option<Value> {
    let data = message.data()?;
    match serde_json::from_str(data) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!("Invalid GMCP data for {}: {}", message.package(), error);
            None
        }
    }
}
