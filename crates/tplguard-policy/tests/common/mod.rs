//! Domain fixtures shared by the integration tests: a small CMS-like object
//! model and the registry a host would build for it.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tplguard_core::{Capability, Markup, Sandboxed, TypeKey};
use tplguard_policy::config::TypeRegistry;

pub trait Collection {}
pub trait Paginator {}

pub struct Model;
pub struct User;
pub struct File;
pub struct Items;
pub struct LengthAwarePaginator;
pub struct Connection;
pub struct Plain;
/// Declares an explicit member list.
pub struct Page;
/// Declares itself callable with any member.
pub struct Open;

impl Sandboxed for Model {}

impl Sandboxed for User {
    fn conforms_to(&self) -> Vec<TypeKey> {
        vec![TypeKey::of::<Model>()]
    }
}

impl Sandboxed for File {
    fn conforms_to(&self) -> Vec<TypeKey> {
        vec![TypeKey::of::<Model>()]
    }
}

impl Sandboxed for Items {
    fn conforms_to(&self) -> Vec<TypeKey> {
        vec![TypeKey::of::<dyn Collection>()]
    }
}

impl Sandboxed for LengthAwarePaginator {
    fn conforms_to(&self) -> Vec<TypeKey> {
        vec![TypeKey::of::<dyn Paginator>()]
    }
}

impl Sandboxed for Connection {}
impl Sandboxed for Plain {}

impl Sandboxed for Page {
    fn capability(&self) -> Capability {
        Capability::Methods(&["title", "url", "getContent"])
    }
}

impl Sandboxed for Open {
    fn capability(&self) -> Capability {
        Capability::Any
    }
}

pub fn registry() -> TypeRegistry {
    TypeRegistry::new()
        .register::<Model>("Model")
        .register::<User>("User")
        .register::<File>("File")
        .register::<Connection>("Connection")
        .register::<dyn Collection>("Collection")
        .register::<dyn Paginator>("Paginator")
}

/// Build a fixture value by name.
pub fn target(name: &str) -> Box<dyn Sandboxed> {
    match name {
        "Model" => Box::new(Model),
        "User" => Box::new(User),
        "File" => Box::new(File),
        "Items" => Box::new(Items),
        "LengthAwarePaginator" => Box::new(LengthAwarePaginator),
        "Connection" => Box::new(Connection),
        "Plain" => Box::new(Plain),
        "Page" => Box::new(Page),
        "Open" => Box::new(Open),
        "Markup" => Box::new(Markup::new("<em>safe</em>")),
        other => panic!("unknown fixture: {other}"),
    }
}

pub const FIXTURES: &[&str] = &[
    "Model",
    "User",
    "File",
    "Items",
    "LengthAwarePaginator",
    "Connection",
    "Plain",
    "Page",
    "Open",
    "Markup",
];
