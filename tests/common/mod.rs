use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use visnotes::{Shape, ShapeId, ShapeKind};

/// Route tracing output through the test harness; `RUST_LOG` picks the level
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

pub fn rect(id: &str, x: f64, y: f64, width: f64, height: f64) -> Shape {
    Shape::new(ShapeId::from(id), x, y, ShapeKind::Rectangle { width, height })
}

#[allow(dead_code)]
pub fn circle(id: &str, x: f64, y: f64, radius: f64) -> Shape {
    Shape::new(ShapeId::from(id), x, y, ShapeKind::Circle { radius })
}
