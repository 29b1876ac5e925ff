//! The hero data-access facade.
//!
//! # Design
//! `HeroService` pairs a `HeroClient` with an injected `Transport` and an
//! injected `MessageLog`. Each public method issues exactly one request and
//! never returns an error: success is logged and forwarded, failure is
//! logged and replaced by a default value.

use crate::client::HeroClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::messages::MessageLog;
use crate::transport::UreqTransport;
use crate::types::{Hero, NewHero};

const LOG_PREFIX: &str = "HeroService";

pub struct HeroService<T, L> {
    client: HeroClient,
    transport: T,
    messages: L,
}

impl<L: MessageLog> HeroService<UreqTransport, L> {
    /// Service talking HTTP to the API named by `config`.
    pub fn connect(config: &ClientConfig, messages: L) -> Self {
        Self::new(&config.base_url, UreqTransport::new(), messages)
    }
}

impl<T: Transport, L: MessageLog> HeroService<T, L> {
    pub fn new(base_url: &str, transport: T, messages: L) -> Self {
        Self {
            client: HeroClient::new(base_url),
            transport,
            messages,
        }
    }

    /// GET all heroes. Empty on failure. "fetched heroes" is logged only
    /// once the response has parsed, never before the request goes out.
    pub fn get_heroes(&self) -> Vec<Hero> {
        let result = self
            .round_trip(Ok(self.client.build_get_heroes()), HeroClient::parse_get_heroes)
            .inspect(|_| self.log("fetched heroes"));
        self.recover_or("getHeroes", result, Vec::new())
    }

    /// GET a hero by id. `None` on failure, including 404.
    pub fn get_hero(&self, id: u32) -> Option<Hero> {
        let result = self
            .round_trip(Ok(self.client.build_get_hero(id)), HeroClient::parse_get_hero)
            .inspect(|_| self.log(&format!("fetched hero id={id}")));
        self.recover_or(&format!("getHero id={id}"), result.map(Some), None)
    }

    /// GET a hero by id through the collection filter. A missing hero is a
    /// normal `None`, not a failure.
    pub fn get_hero_no_404(&self, id: u32) -> Option<Hero> {
        let result = self
            .round_trip(
                Ok(self.client.build_get_hero_no_404(id)),
                HeroClient::parse_get_hero_no_404,
            )
            .inspect(|hero| {
                let outcome = if hero.is_some() { "fetched" } else { "did not find" };
                self.log(&format!("{outcome} hero id={id}"));
            });
        self.recover_or(&format!("getHero id={id}"), result, None)
    }

    /// GET heroes whose name contains `term`. Blank terms short-circuit to an
    /// empty list without touching the network.
    pub fn search_heroes(&self, term: &str) -> Vec<Hero> {
        if term.trim().is_empty() {
            return Vec::new();
        }
        let result = self
            .round_trip(
                Ok(self.client.build_search_heroes(term)),
                HeroClient::parse_search_heroes,
            )
            .inspect(|heroes| {
                if heroes.is_empty() {
                    self.log(&format!("no heroes matching \"{term}\""));
                } else {
                    self.log(&format!("found heroes matching \"{term}\""));
                }
            });
        self.recover_or("searchHeroes", result, Vec::new())
    }

    /// POST a new hero. Returns the stored hero with its assigned id.
    pub fn add_hero(&self, hero: &NewHero) -> Option<Hero> {
        let result = self
            .round_trip(self.client.build_add_hero(hero), HeroClient::parse_add_hero)
            .inspect(|added| self.log(&format!("added hero w/ id={}", added.id)));
        self.recover_or("addHero", result.map(Some), None)
    }

    /// PUT a hero. `true` when the store accepted it.
    pub fn update_hero(&self, hero: &Hero) -> bool {
        let result = self
            .round_trip(self.client.build_update_hero(hero), HeroClient::parse_update_hero)
            .inspect(|_| self.log(&format!("updated hero id={}", hero.id)));
        self.recover_or("updateHero", result.map(|_| true), false)
    }

    /// DELETE a hero by id. `true` when the store removed it.
    pub fn delete_hero(&self, id: u32) -> bool {
        let result = self
            .round_trip(Ok(self.client.build_delete_hero(id)), HeroClient::parse_delete_hero)
            .inspect(|_| self.log(&format!("deleted hero id={id}")));
        self.recover_or("deleteHero", result.map(|_| true), false)
    }

    /// Unwraps `result`, or logs the failure of `operation` and returns
    /// `default`.
    pub fn recover_or<R>(&self, operation: &str, result: Result<R, ApiError>, default: R) -> R {
        match result {
            Ok(value) => value,
            Err(error) => self.handle_error(operation, error, default),
        }
    }

    fn handle_error<R>(&self, operation: &str, error: ApiError, default: R) -> R {
        tracing::error!(operation, %error, "hero request failed");
        self.log(&format!("{operation} failed: {error}"));
        default
    }

    fn round_trip<R>(
        &self,
        request: Result<HttpRequest, ApiError>,
        parse: impl FnOnce(&HeroClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let response = self.transport.execute(request?)?;
        parse(&self.client, response)
    }

    fn log(&self, message: &str) {
        self.messages.add(format!("{LOG_PREFIX}: {message}"));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::http::HttpMethod;
    use crate::messages::MessageService;

    /// Replays queued replies and records every request it sees.
    #[derive(Default)]
    struct ScriptedTransport {
        replies: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn reply(self, status: u16, body: &str) -> Self {
            self.replies.borrow_mut().push_back(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }));
            self
        }

        fn fail(self) -> Self {
            self.replies
                .borrow_mut()
                .push_back(Err(ApiError::Transport("connection refused".to_string())));
            self
        }

        fn requests(&self) -> Vec<(HttpMethod, String)> {
            self.seen
                .borrow()
                .iter()
                .map(|r| (r.method, r.path.clone()))
                .collect()
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request);
            self.replies
                .borrow_mut()
                .pop_front()
                .expect("unexpected request")
        }
    }

    const BASE: &str = "http://localhost:3000";

    fn service<'a>(
        transport: &'a ScriptedTransport,
        log: &'a MessageService,
    ) -> HeroService<&'a ScriptedTransport, &'a MessageService> {
        HeroService::new(BASE, transport, log)
    }

    fn narco() -> Hero {
        Hero {
            id: 12,
            name: "Narco".to_string(),
        }
    }

    #[test]
    fn get_heroes_logs_and_returns_list() {
        let transport = ScriptedTransport::default().reply(200, r#"[{"id":12,"name":"Narco"}]"#);
        let log = MessageService::new();
        let heroes = service(&transport, &log).get_heroes();
        assert_eq!(heroes, vec![narco()]);
        assert_eq!(transport.requests(), vec![(HttpMethod::Get, format!("{BASE}/api/heroes"))]);
        assert_eq!(log.messages(), vec!["HeroService: fetched heroes"]);
    }

    #[test]
    fn get_heroes_failure_yields_empty_list() {
        let transport = ScriptedTransport::default().fail();
        let log = MessageService::new();
        assert!(service(&transport, &log).get_heroes().is_empty());
        assert_eq!(
            log.messages(),
            vec!["HeroService: getHeroes failed: transport failed: connection refused"]
        );
    }

    #[test]
    fn get_hero_not_found_yields_none() {
        let transport = ScriptedTransport::default().reply(404, "");
        let log = MessageService::new();
        assert!(service(&transport, &log).get_hero(99).is_none());
        assert_eq!(
            transport.requests(),
            vec![(HttpMethod::Get, format!("{BASE}/api/heroes/99"))]
        );
        assert_eq!(
            log.messages(),
            vec!["HeroService: getHero id=99 failed: resource not found"]
        );
    }

    #[test]
    fn get_hero_no_404_returns_first_match() {
        let transport = ScriptedTransport::default()
            .reply(200, r#"[{"id":12,"name":"Narco"},{"id":13,"name":"Bombasto"}]"#);
        let log = MessageService::new();
        assert_eq!(service(&transport, &log).get_hero_no_404(12), Some(narco()));
        assert_eq!(
            transport.requests(),
            vec![(HttpMethod::Get, format!("{BASE}/api/heroes?id=12"))]
        );
        assert_eq!(log.messages(), vec!["HeroService: fetched hero id=12"]);
    }

    #[test]
    fn get_hero_no_404_absence_is_not_an_error() {
        let transport = ScriptedTransport::default().reply(200, "[]");
        let log = MessageService::new();
        assert!(service(&transport, &log).get_hero_no_404(42).is_none());
        assert_eq!(log.messages(), vec!["HeroService: did not find hero id=42"]);
    }

    #[test]
    fn get_hero_no_404_failure_yields_none() {
        let transport = ScriptedTransport::default().reply(500, "x").reply(200, "{}");
        let log = MessageService::new();
        let svc = service(&transport, &log);
        assert!(svc.get_hero_no_404(7).is_none());
        assert!(svc.get_hero_no_404(8).is_none());
        let messages = log.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "HeroService: getHero id=7 failed: HTTP 500: x");
        assert!(messages[1].starts_with("HeroService: getHero id=8 failed: deserialization failed"));
    }

    #[test]
    fn search_blank_term_skips_network() {
        let transport = ScriptedTransport::default();
        let log = MessageService::new();
        let svc = service(&transport, &log);
        assert!(svc.search_heroes("").is_empty());
        assert!(svc.search_heroes(" \t ").is_empty());
        assert!(transport.requests().is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn search_logs_hit_and_miss() {
        let transport = ScriptedTransport::default()
            .reply(200, r#"[{"id":12,"name":"Narco"}]"#)
            .reply(200, "[]");
        let log = MessageService::new();
        let svc = service(&transport, &log);
        assert_eq!(svc.search_heroes("nar").len(), 1);
        assert!(svc.search_heroes("zzz").is_empty());
        assert_eq!(
            log.messages(),
            vec![
                "HeroService: found heroes matching \"nar\"",
                "HeroService: no heroes matching \"zzz\"",
            ]
        );
    }

    #[test]
    fn search_failure_yields_empty_list() {
        let transport = ScriptedTransport::default().reply(500, "down");
        let log = MessageService::new();
        assert!(service(&transport, &log).search_heroes("nar").is_empty());
        assert_eq!(
            log.messages(),
            vec!["HeroService: searchHeroes failed: HTTP 500: down"]
        );
    }

    #[test]
    fn add_hero_logs_assigned_id() {
        let transport = ScriptedTransport::default().reply(201, r#"{"id":21,"name":"Windstorm"}"#);
        let log = MessageService::new();
        let added = service(&transport, &log).add_hero(&NewHero::new("Windstorm"));
        assert_eq!(added.map(|h| h.id), Some(21));
        assert_eq!(transport.requests(), vec![(HttpMethod::Post, format!("{BASE}/api/heroes"))]);
        assert_eq!(log.messages(), vec!["HeroService: added hero w/ id=21"]);
    }

    #[test]
    fn add_hero_bad_body_yields_none() {
        let transport = ScriptedTransport::default().reply(201, "{}");
        let log = MessageService::new();
        assert!(service(&transport, &log).add_hero(&NewHero::new("Windstorm")).is_none());
        assert!(log.messages()[0].starts_with("HeroService: addHero failed: deserialization failed"));
    }

    #[test]
    fn update_hero_puts_to_collection() {
        let transport = ScriptedTransport::default().reply(204, "");
        let log = MessageService::new();
        assert!(service(&transport, &log).update_hero(&narco()));
        assert_eq!(transport.requests(), vec![(HttpMethod::Put, format!("{BASE}/api/heroes"))]);
        assert_eq!(log.messages(), vec!["HeroService: updated hero id=12"]);
    }

    #[test]
    fn update_hero_failure_yields_false() {
        let transport = ScriptedTransport::default().fail();
        let log = MessageService::new();
        assert!(!service(&transport, &log).update_hero(&narco()));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn delete_hero_addresses_hero() {
        let transport = ScriptedTransport::default().reply(204, "");
        let log = MessageService::new();
        assert!(service(&transport, &log).delete_hero(12));
        assert_eq!(
            transport.requests(),
            vec![(HttpMethod::Delete, format!("{BASE}/api/heroes/12"))]
        );
        assert_eq!(log.messages(), vec!["HeroService: deleted hero id=12"]);
    }

    #[test]
    fn delete_hero_not_found_yields_false() {
        let transport = ScriptedTransport::default().reply(404, "");
        let log = MessageService::new();
        assert!(!service(&transport, &log).delete_hero(12));
        assert_eq!(
            log.messages(),
            vec!["HeroService: deleteHero failed: resource not found"]
        );
    }

    #[test]
    fn recover_or_uses_caller_default() {
        let transport = ScriptedTransport::default();
        let log = MessageService::new();
        let svc = service(&transport, &log);
        let fallback = svc.recover_or("custom", Err(ApiError::NotFound), narco());
        assert_eq!(fallback, narco());
        assert_eq!(svc.recover_or("custom", Ok(3), 0), 3);
        assert_eq!(log.messages(), vec!["HeroService: custom failed: resource not found"]);
    }
}
