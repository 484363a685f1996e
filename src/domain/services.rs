//! Stack routing services for the navigation tree.
//!
//! This module provides the router abstraction, a base stack router that
//! owns rehydration bookkeeping and the stack primitives, and a responsive
//! wrapper that guarantees a central content pane on wide layouts.

use std::cell::Cell;
use std::collections::HashMap;

use super::models::{NavigationState, Route, RouteParams, ScreenName};

/// Derives a stable identity from a route's parameters, used to key routes
/// that represent the same destination across rehydrations.
pub type RouteIdGenerator = fn(&RouteParams) -> Option<String>;

/// Routing configuration supplied by the caller: the set of known route
/// names, per-route default parameters, and per-route identity generators.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub route_names: Vec<ScreenName>,
    pub default_params: HashMap<ScreenName, RouteParams>,
    pub id_generators: HashMap<ScreenName, RouteIdGenerator>,
    pub initial_route: ScreenName,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            route_names: ScreenName::ALL.to_vec(),
            default_params: HashMap::new(),
            id_generators: HashMap::new(),
            initial_route: ScreenName::Home,
        }
    }
}

/// A navigation action applied to a stack of routes.
#[derive(Debug, Clone, PartialEq)]
pub enum NavAction {
    /// Append a route and focus it
    Push {
        name: ScreenName,
        params: Option<RouteParams>,
    },
    /// Remove the topmost route
    Pop,
    /// Focus the last existing route with this name, or push it
    Navigate {
        name: ScreenName,
        params: Option<RouteParams>,
    },
    /// Merge parameters into the active route
    SetParams { params: RouteParams },
}

/// The routing operations a navigation container needs from a router.
///
/// Implementations are free to build new state values rather than mutate
/// their inputs; callers only rely on the returned value.
pub trait Router {
    /// Builds the state a navigator starts from when it has no history.
    fn initial_state(&self, config: &RouterConfig) -> NavigationState;

    /// Turns a possibly-partial state tree into a fully derived one.
    fn rehydrate(&self, partial: NavigationState, config: &RouterConfig) -> NavigationState;

    /// Applies an action to the given state, returning `None` when the
    /// action is not handled (for example popping the last route).
    fn apply_action(
        &self,
        state: &NavigationState,
        action: &NavAction,
        config: &RouterConfig,
    ) -> Option<NavigationState>;

    /// Whether applying the action moves focus to a different route.
    fn should_action_change_focus(&self, action: &NavAction) -> bool;
}

/// Base stack router.
///
/// Rehydration drops routes whose names are outside the configuration,
/// recursively rehydrates nested states, merges per-route default parameters
/// beneath explicit ones, assigns identity keys, clamps the active index
/// into range, and clears the stale flag. A stale input state gets fresh
/// keys for every route; otherwise only keyless routes are keyed.
///
/// # Examples
///
/// ```
/// use splitnav::domain::{NavigationState, Route, Router, RouterConfig, ScreenName, StackRouter};
///
/// let router = StackRouter::new();
/// let partial = NavigationState::from_routes(vec![Route::screen(ScreenName::Home)]);
/// let state = router.rehydrate(partial, &RouterConfig::default());
///
/// assert!(state.routes[0].key.is_some());
/// assert!(!state.stale);
/// ```
pub struct StackRouter {
    next_key: Cell<u64>,
}

impl StackRouter {
    pub fn new() -> Self {
        Self { next_key: Cell::new(0) }
    }

    fn fresh_key(&self, route: &Route, config: &RouterConfig) -> String {
        if let Some(generator) = config.id_generators.get(&route.name) {
            let empty = RouteParams::new();
            let params = route.params.as_ref().unwrap_or(&empty);
            if let Some(id) = generator(params) {
                return format!("{}-{}", route.name.as_str(), id);
            }
        }
        let serial = self.next_key.get();
        self.next_key.set(serial + 1);
        format!("{}-{}", route.name.as_str(), serial)
    }
}

impl Default for StackRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Router for StackRouter {
    fn initial_state(&self, config: &RouterConfig) -> NavigationState {
        let mut route = Route::screen(config.initial_route);
        if let Some(defaults) = config.default_params.get(&config.initial_route) {
            route.params = Some(defaults.clone());
        }
        route.key = Some(self.fresh_key(&route, config));
        NavigationState::from_routes(vec![route])
    }

    fn rehydrate(&self, partial: NavigationState, config: &RouterConfig) -> NavigationState {
        let stale = partial.stale;
        let mut routes: Vec<Route> = partial
            .routes
            .into_iter()
            .filter(|route| config.route_names.contains(&route.name))
            .collect();

        if routes.is_empty() {
            return self.initial_state(config);
        }

        for route in &mut routes {
            if let Some(defaults) = config.default_params.get(&route.name) {
                let mut merged = defaults.clone();
                if let Some(params) = route.params.take() {
                    merged.extend(params);
                }
                route.params = Some(merged);
            }
            if let Some(nested) = route.state.take() {
                route.state = Some(Box::new(self.rehydrate(*nested, config)));
            }
            if stale || route.key.is_none() {
                let key = self.fresh_key(route, config);
                route.key = Some(key);
            }
        }

        let index = partial.index.min(routes.len() - 1);
        NavigationState { index, stale: false, routes }
    }

    fn apply_action(
        &self,
        state: &NavigationState,
        action: &NavAction,
        config: &RouterConfig,
    ) -> Option<NavigationState> {
        match action {
            NavAction::Push { name, params } => {
                if !config.route_names.contains(name) {
                    return None;
                }
                let mut next = state.clone();
                let mut route = Route::screen(*name);
                route.params = params.clone();
                route.key = Some(self.fresh_key(&route, config));
                next.routes.push(route);
                next.index = next.routes.len() - 1;
                Some(next)
            }
            NavAction::Pop => {
                if state.routes.len() <= 1 {
                    return None;
                }
                let mut next = state.clone();
                next.routes.pop();
                next.index = next.routes.len() - 1;
                Some(next)
            }
            NavAction::Navigate { name, params } => {
                match state.routes.iter().rposition(|route| route.name == *name) {
                    Some(position) => {
                        let mut next = state.clone();
                        if let Some(params) = params {
                            let route = &mut next.routes[position];
                            let mut merged = route.params.take().unwrap_or_default();
                            merged.extend(params.clone());
                            route.params = Some(merged);
                        }
                        next.index = position;
                        Some(next)
                    }
                    None => {
                        let push = NavAction::Push {
                            name: *name,
                            params: params.clone(),
                        };
                        self.apply_action(state, &push, config)
                    }
                }
            }
            NavAction::SetParams { params } => {
                let mut next = state.clone();
                let route = next.routes.get_mut(next.index)?;
                let mut merged = route.params.take().unwrap_or_default();
                merged.extend(params.clone());
                route.params = Some(merged);
                Some(next)
            }
        }
    }

    fn should_action_change_focus(&self, action: &NavAction) -> bool {
        !matches!(action, NavAction::SetParams { .. })
    }
}

/// Checks whether any top-level route is the central-pane navigator.
pub fn has_central_pane(state: &NavigationState) -> bool {
    state
        .routes
        .iter()
        .any(|route| route.name == ScreenName::CentralPane)
}

/// Finds the report currently in view by walking the state tree depth-first.
///
/// Overlay panels are layered above the base stack, so the *last* top-level
/// right-modal route wins over everything beneath it; within a branch the
/// topmost route's nested state is followed until a route with a non-empty
/// string `reportID` parameter is reached.
///
/// # Returns
///
/// The innermost `reportID`, or an empty string when no candidate exists.
///
/// # Examples
///
/// ```
/// use splitnav::domain::{top_most_report_id, NavigationState, Route, ScreenName};
///
/// let overlay = Route::with_state(
///     ScreenName::RightModal,
///     NavigationState::from_routes(vec![Route::report("123")]),
/// );
/// let state = NavigationState::from_routes(vec![Route::screen(ScreenName::Home), overlay]);
///
/// assert_eq!(top_most_report_id(Some(&state)), "123");
/// assert_eq!(top_most_report_id(None), "");
/// ```
pub fn top_most_report_id(state: Option<&NavigationState>) -> String {
    let Some(state) = state else {
        return String::new();
    };

    let topmost_right_modal = state
        .routes
        .iter()
        .rev()
        .find(|route| route.name == ScreenName::RightModal);
    if let Some(modal) = topmost_right_modal {
        if let Some(nested) = &modal.state {
            return top_most_report_id(Some(nested));
        }
    }

    let Some(topmost) = state.routes.last() else {
        return String::new();
    };
    if let Some(nested) = &topmost.state {
        return top_most_report_id(Some(nested));
    }
    match topmost.report_id() {
        Some(id) => id.to_string(),
        None => String::new(),
    }
}

/// Adds a central-pane route without a specific report to the state. The
/// report pane resolves its own default report when the seeded id is empty.
fn insert_central_pane_route(state: &mut NavigationState) {
    let report_id = top_most_report_id(Some(state));
    let route = Route::with_state(
        ScreenName::CentralPane,
        NavigationState::from_routes(vec![Route::report(&report_id)]),
    );
    let position = 1.min(state.routes.len());
    state.routes.insert(position, route);
    state.index = state.routes.len() - 1;
}

/// A router wrapper that keeps wide layouts showing a central pane.
///
/// Wraps any [`Router`] together with a layout predicate supplied at
/// construction. Rehydration evaluates the predicate fresh on every call;
/// when the layout is wide and no top-level central-pane route exists, one
/// is inserted at position 1, seeded with the topmost report id, the state
/// is marked stale so the inserted routes get fresh keys, and the active
/// index moves to the last route. The normalized state is then handed to
/// the wrapped router. All other operations delegate unchanged, so the
/// wrapper is a drop-in substitute for the router it wraps.
///
/// # Examples
///
/// ```
/// use splitnav::domain::{
///     NavigationState, ResponsiveRouter, Route, Router, RouterConfig, ScreenName, StackRouter,
/// };
///
/// let router = ResponsiveRouter::new(StackRouter::new(), || false);
/// let partial = NavigationState::from_routes(vec![Route::screen(ScreenName::BottomTab)]);
/// let state = router.rehydrate(partial, &RouterConfig::default());
///
/// assert_eq!(state.routes.len(), 2);
/// assert_eq!(state.routes[1].name, ScreenName::CentralPane);
/// assert_eq!(state.index, 1);
/// ```
pub struct ResponsiveRouter<R, F> {
    inner: R,
    is_small_screen: F,
}

impl<R: Router, F: Fn() -> bool> ResponsiveRouter<R, F> {
    /// Creates a wrapper around `inner` using the given layout predicate.
    ///
    /// The predicate is a capability, not global state: it is queried on
    /// every rehydration and never cached.
    pub fn new(inner: R, is_small_screen: F) -> Self {
        Self { inner, is_small_screen }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: Router, F: Fn() -> bool> Router for ResponsiveRouter<R, F> {
    fn initial_state(&self, config: &RouterConfig) -> NavigationState {
        self.inner.initial_state(config)
    }

    fn rehydrate(&self, mut partial: NavigationState, config: &RouterConfig) -> NavigationState {
        if !partial.routes.is_empty() && !has_central_pane(&partial) && !(self.is_small_screen)() {
            // The inserted route needs a fresh key on the next render pass
            partial.stale = true;
            insert_central_pane_route(&mut partial);
        }
        self.inner.rehydrate(partial, config)
    }

    fn apply_action(
        &self,
        state: &NavigationState,
        action: &NavAction,
        config: &RouterConfig,
    ) -> Option<NavigationState> {
        self.inner.apply_action(state, action, config)
    }

    fn should_action_change_focus(&self, action: &NavAction) -> bool {
        self.inner.should_action_change_focus(action)
    }
}
