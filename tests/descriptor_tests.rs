use std::sync::Arc;

use http::Method;
use remora::annotation::AnnotationDecl;
use remora::class::{Args, RouteClass, RouteHandler, StageOutput};
use remora::descriptor::build_descriptors;
use remora::error::Error;
use remora::source::{ClassDeclaration, ClassSource, StaticSource};
use remora::stage::Stage;

struct NoopRoute;

#[async_trait::async_trait]
impl RouteHandler for NoopRoute {
    async fn call(&mut self, _stage: Stage, _args: Args) -> Result<StageOutput, Error> {
        Ok(StageOutput::Empty)
    }
}

fn noop_class(id: &str) -> Arc<RouteClass> {
    Arc::new(RouteClass::new(id, |_ctx, _params| Box::new(NoopRoute)).stage(Stage::Process, &[]))
}

#[test]
fn test_one_descriptor_per_route_declaration() {
    let declaration = ClassDeclaration {
        class: noop_class("routes/parameters"),
        declarations: vec![
            AnnotationDecl::with_primary("Route", "GET /parameters"),
            AnnotationDecl::with_primary("Route", "POST /parameters"),
            AnnotationDecl::with_primary("Query", "page")
                .option("type", "int")
                .option("default", 1),
        ],
    };

    let descriptors = build_descriptors(&declaration).unwrap();
    assert_eq!(descriptors.len(), 2);
    assert_eq!(descriptors[0].method, Method::GET);
    assert_eq!(descriptors[1].method, Method::POST);
    assert_eq!(descriptors[0].path, "/parameters");
    assert_eq!(descriptors[1].path, "/parameters");

    // Both descriptors share the class and the auxiliary list.
    assert!(Arc::ptr_eq(&descriptors[0].class, &descriptors[1].class));
    assert!(Arc::ptr_eq(
        &descriptors[0].annotations,
        &descriptors[1].annotations
    ));
    assert_eq!(descriptors[0].annotations.len(), 1);
    assert_eq!(descriptors[0].annotations[0].kind(), "Query");
}

#[test]
fn test_route_options_are_captured() {
    let declaration = ClassDeclaration {
        class: noop_class("routes/template"),
        declarations: vec![
            AnnotationDecl::with_primary("Route", "GET /annotation-param").option("template", "test"),
        ],
    };

    let descriptors = build_descriptors(&declaration).unwrap();
    assert_eq!(descriptors.len(), 1);
    assert_eq!(
        descriptors[0].options.get("template"),
        Some(&serde_json::json!("test"))
    );
}

#[test]
fn test_class_without_routes_yields_nothing() {
    let declaration = ClassDeclaration {
        class: noop_class("routes/silent"),
        declarations: vec![
            AnnotationDecl::with_primary("Query", "page").option("type", "int"),
        ],
    };
    assert!(build_descriptors(&declaration).unwrap().is_empty());
}

#[test]
fn test_route_without_primary_is_a_discovery_error() {
    let declaration = ClassDeclaration {
        class: noop_class("routes/broken"),
        declarations: vec![AnnotationDecl::new("Route")],
    };
    assert!(matches!(
        build_descriptors(&declaration),
        Err(Error::Discovery(_))
    ));
}

#[test]
fn test_route_without_verb_is_a_discovery_error() {
    let declaration = ClassDeclaration {
        class: noop_class("routes/broken"),
        declarations: vec![AnnotationDecl::with_primary("Route", "/no-verb")],
    };
    assert!(matches!(
        build_descriptors(&declaration),
        Err(Error::Discovery(_))
    ));
}

#[test]
fn test_route_with_invalid_method_is_a_discovery_error() {
    let declaration = ClassDeclaration {
        class: noop_class("routes/broken"),
        declarations: vec![AnnotationDecl::with_primary("Route", "G@T /x")],
    };
    assert!(matches!(
        build_descriptors(&declaration),
        Err(Error::Discovery(_))
    ));
}

#[test]
fn test_route_path_must_start_with_slash() {
    let declaration = ClassDeclaration {
        class: noop_class("routes/broken"),
        declarations: vec![AnnotationDecl::with_primary("Route", "GET relative")],
    };
    assert!(matches!(
        build_descriptors(&declaration),
        Err(Error::Discovery(_))
    ));
}

#[test]
fn test_static_source_filters_by_pattern() {
    let source = StaticSource::new()
        .declare(
            RouteClass::new("routes/page", |_ctx, _params| Box::new(NoopRoute)),
            vec![AnnotationDecl::with_primary("Route", "GET /page")],
        )
        .declare(
            RouteClass::new("internal/admin", |_ctx, _params| Box::new(NoopRoute)),
            vec![AnnotationDecl::with_primary("Route", "GET /admin")],
        );

    let matched = source.load("routes/**").unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].class.id(), "routes/page");

    let all = source.load("**").unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_static_source_rejects_invalid_pattern() {
    let source = StaticSource::new();
    assert!(matches!(source.load("["), Err(Error::Discovery(_))));
}
