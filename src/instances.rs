//! Per-request instance registry.
//!
//! Each request context owns one [`InstanceMap`], keyed by route-class
//! identity. The map is an explicit field of the context rather than a
//! generic named parameter, so its lifetime and ownership are exactly the
//! request's and it can never leak into the injectable argument space.

use std::{collections::HashMap, sync::Arc};

use serde_json::{Map, Value};

use crate::{
    class::{RouteClass, RouteHandler, StageOutput},
    pipeline::{StageCallback, sync_callback},
};

/// Route-handler instances constructed for the current request, keyed by
/// class identity.
#[derive(Default)]
pub struct InstanceMap {
    map: HashMap<String, Box<dyn RouteHandler>>,
}

impl InstanceMap {
    pub(crate) fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    pub(crate) fn insert(&mut self, id: String, instance: Box<dyn RouteHandler>) {
        self.map.insert(id, instance);
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Box<dyn RouteHandler>> {
        self.map.get_mut(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}

/// The `initialize` callback that constructs the route class for this
/// request. Construction is idempotent per class identity: the first
/// registration to run wins, so a class declaring several verbs on one
/// path still gets exactly one instance per request.
pub fn construct_callback(
    class: Arc<RouteClass>,
    parameters: Arc<Map<String, Value>>,
) -> StageCallback {
    sync_callback(move |ctx| {
        if !ctx.instances.contains(class.id()) {
            let instance = class.construct(ctx, &parameters);
            ctx.instances.insert(class.id().to_owned(), instance);
        }
        Ok(StageOutput::Empty)
    })
}

/// The `initialize` callback that seeds the parameter store with the
/// routing declaration's extra options, before any later stage runs.
pub fn seed_callback(options: Map<String, Value>) -> StageCallback {
    sync_callback(move |ctx| {
        for (key, value) in &options {
            ctx.set_parameter(key.clone(), value.clone());
        }
        Ok(StageOutput::Empty)
    })
}
