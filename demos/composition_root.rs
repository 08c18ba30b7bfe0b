//! A composition root with one child container per request.
//!
//! Run with `RUST_LOG=funq=debug cargo run --example composition_root` to see
//! the container's own events.

use funq::{Container, ContainerOptions, DiResult, Dispose, LoggingObserver, Owner, Resolver, ReuseScope};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

trait Clock {
    fn now(&self) -> u64;
}

struct TickingClock {
    ticks: Cell<u64>,
}

impl Clock for TickingClock {
    fn now(&self) -> u64 {
        self.ticks.set(self.ticks.get() + 1);
        self.ticks.get()
    }
}

struct ConnectionPool {
    url: String,
    opened: Cell<u32>,
}

struct Connection {
    id: u32,
    closed: Cell<bool>,
}

impl Dispose for Connection {
    fn dispose(&self) {
        self.closed.set(true);
        println!("  connection #{} closed", self.id);
    }
}

struct RequestHandler {
    path: String,
    connection: Rc<Connection>,
    clock: Rc<dyn Clock>,
}

impl RequestHandler {
    fn handle(&self) -> String {
        format!(
            "GET {} on connection #{} at tick {}",
            self.path,
            self.connection.id,
            self.clock.now()
        )
    }
}

fn compose(root: &Container<'_>, audit: Rc<RefCell<Vec<String>>>) -> DiResult<()> {
    root.register::<dyn Clock, _>(|_| Ok(Rc::new(TickingClock { ticks: Cell::new(0) }) as Rc<dyn Clock>))
        .reused_within(ReuseScope::Hierarchy);

    root.register::<ConnectionPool, _>(|_| {
        Ok(Rc::new(ConnectionPool {
            url: "postgres://localhost/app".to_string(),
            opened: Cell::new(0),
        }))
    })
    .reused_within(ReuseScope::Hierarchy)
    .owned_by(Owner::External);

    root.register_disposable::<Connection, _>(|c| {
        let pool = c.resolve::<ConnectionPool>()?;
        pool.opened.set(pool.opened.get() + 1);
        Ok(Rc::new(Connection {
            id: pool.opened.get(),
            closed: Cell::new(false),
        }))
    })
    .reused_within(ReuseScope::Container);

    root.register_with::<RequestHandler, _, _>(move |c, (path,): (String,)| {
        audit.borrow_mut().push(path.clone());
        Ok(Rc::new(RequestHandler {
            path,
            connection: c.resolve()?,
            clock: c.resolve()?,
        }))
    });

    root.configure()
}

fn main() -> DiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let audit = Rc::new(RefCell::new(Vec::new()));
    let root = Container::with_options(ContainerOptions::from_env()?);
    root.add_observer(Rc::new(LoggingObserver::new()));
    compose(&root, audit.clone())?;

    for path in ["/users", "/orders", "/users/7"] {
        let connection = root.with_child(|request| -> DiResult<Rc<Connection>> {
            let handler = request.resolve_with::<RequestHandler, _>((path.to_string(),))?;
            println!("{}", handler.handle());

            // Same connection for everything inside one request.
            let again = request.resolve::<Connection>()?;
            assert!(Rc::ptr_eq(&handler.connection, &again));
            Ok(again)
        })?;
        assert!(connection.closed.get());
    }

    let pool = root.resolve::<ConnectionPool>()?;
    println!("pool {} opened {} connections", pool.url, pool.opened.get());
    println!("handled: {:?}", audit.borrow());
    Ok(())
}
