use funq::{Container, ContainerOptions, Dispose, Owner, Resolver, ReuseScope};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

struct Resource {
    name: String,
    released: Cell<bool>,
    log: Log,
}

impl Resource {
    fn new(name: &str, log: &Log) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            released: Cell::new(false),
            log: log.clone(),
        })
    }
}

impl Dispose for Resource {
    fn dispose(&self) {
        self.released.set(true);
        self.log.borrow_mut().push(self.name.clone());
    }
}

fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn test_container_owned_instance_released_on_drop() {
    let log = new_log();
    let factory_log = log.clone();

    let resource = {
        let container = Container::new();
        container.register_disposable::<Resource, _>(move |_| Ok(Resource::new("db", &factory_log)));
        container.configure().unwrap();
        let resource = container.resolve::<Resource>().unwrap();
        assert!(!resource.released.get());
        resource
    };

    assert!(resource.released.get());
    assert_eq!(*log.borrow(), vec!["db"]);
}

#[test]
fn test_explicit_dispose_is_idempotent() {
    let log = new_log();
    let factory_log = log.clone();

    let container = Container::new();
    container.register_disposable::<Resource, _>(move |_| Ok(Resource::new("db", &factory_log)));
    container.configure().unwrap();

    let resource = container.resolve::<Resource>().unwrap();
    assert_eq!(container.owned_instances(), 1);

    container.dispose();
    assert!(resource.released.get());
    assert_eq!(container.owned_instances(), 0);

    container.dispose();
    drop(container);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_external_owner_never_released() {
    let log = new_log();
    let factory_log = log.clone();

    let container = Container::new();
    container
        .register_disposable::<Resource, _>(move |_| Ok(Resource::new("external", &factory_log)))
        .owned_by(Owner::External);
    container.configure().unwrap();

    let resource = container.resolve::<Resource>().unwrap();
    container.dispose();
    drop(container);

    assert!(!resource.released.get());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_plain_registration_is_not_tracked() {
    let log = new_log();
    let factory_log = log.clone();

    let container = Container::new();
    container.register::<Resource, _>(move |_| Ok(Resource::new("plain", &factory_log)));
    container.configure().unwrap();

    let resource = container.resolve::<Resource>().unwrap();
    assert_eq!(container.owned_instances(), 0);
    drop(container);

    assert!(!resource.released.get());
}

#[test]
fn test_container_does_not_keep_instances_alive() {
    let log = new_log();
    let factory_log = log.clone();

    let container = Container::new();
    container.register_disposable::<Resource, _>(move |_| Ok(Resource::new("transient", &factory_log)));
    container.configure().unwrap();

    let resource = container.resolve::<Resource>().unwrap();
    let weak = Rc::downgrade(&resource);
    drop(resource);
    assert!(weak.upgrade().is_none());

    // The stale handle is skipped.
    container.dispose();
    assert!(log.borrow().is_empty());
}

#[test]
fn test_handles_to_dropped_instances_are_pruned() {
    let log = new_log();
    let factory_log = log.clone();
    let created = Rc::new(Cell::new(0u32));
    let counter = created.clone();

    let container = Container::new();
    container.register_disposable::<Resource, _>(move |_| {
        counter.set(counter.get() + 1);
        Ok(Resource::new(&format!("r{}", counter.get()), &factory_log))
    });
    container.configure().unwrap();

    let kept = container.resolve::<Resource>().unwrap();
    for _ in 0..10_000 {
        drop(container.resolve::<Resource>().unwrap());
    }
    assert_eq!(created.get(), 10_001);
    assert!(container.owned_instances() <= 64);

    let last = container.resolve::<Resource>().unwrap();
    container.dispose();
    assert!(kept.released.get());
    assert!(last.released.get());
    assert_eq!(*log.borrow(), vec!["r10002", "r1"]);
}

#[test]
fn test_release_order_is_most_recent_first() {
    let log = new_log();
    let first_log = log.clone();
    let second_log = log.clone();

    let container = Container::new();
    container
        .register_disposable::<Resource, _>(move |_| Ok(Resource::new("first", &first_log)))
        .named("first");
    container
        .register_disposable::<Resource, _>(move |_| Ok(Resource::new("second", &second_log)))
        .named("second");
    container.configure().unwrap();

    let _first = container.resolve_named::<Resource>("first").unwrap();
    let _second = container.resolve_named::<Resource>("second").unwrap();
    container.dispose();

    assert_eq!(*log.borrow(), vec!["second", "first"]);
}

#[test]
fn test_cached_instance_recorded_once() {
    let log = new_log();
    let factory_log = log.clone();

    let container = Container::new();
    container
        .register_disposable::<Resource, _>(move |_| Ok(Resource::new("cached", &factory_log)))
        .reused_within(ReuseScope::Container);
    container.configure().unwrap();

    let _a = container.resolve::<Resource>().unwrap();
    let _b = container.resolve::<Resource>().unwrap();
    assert_eq!(container.owned_instances(), 1);

    container.dispose();
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_child_disposal_does_not_cascade() {
    let log = new_log();
    let factory_log = log.clone();

    let root = Container::new();
    root.register_disposable::<Resource, _>(move |_| Ok(Resource::new("scoped", &factory_log)))
        .reused_within(ReuseScope::Container);
    root.configure().unwrap();

    let parent_instance = root.resolve::<Resource>().unwrap();
    {
        let child = root.create_child_container();
        let child_instance = child.resolve::<Resource>().unwrap();
        drop(child);
        assert!(child_instance.released.get());
    }
    assert!(!parent_instance.released.get());

    let child = root.create_child_container();
    let child_instance = child.resolve::<Resource>().unwrap();
    root.dispose();
    assert!(parent_instance.released.get());
    assert!(!child_instance.released.get());
}

#[test]
fn test_hierarchy_instance_owned_by_holder() {
    let log = new_log();
    let factory_log = log.clone();

    let root = Container::new();
    root.register_disposable::<Resource, _>(move |_| Ok(Resource::new("shared", &factory_log)))
        .reused_within(ReuseScope::Hierarchy);
    root.configure().unwrap();

    let shared = root.with_child(|request| request.resolve::<Resource>().unwrap());
    assert!(!shared.released.get());
    assert_eq!(root.owned_instances(), 1);

    drop(root);
    assert!(shared.released.get());
}

#[test]
fn test_transient_from_parent_owned_by_resolving_child() {
    let log = new_log();
    let factory_log = log.clone();

    let root = Container::new();
    root.register_disposable::<Resource, _>(move |_| Ok(Resource::new("transient", &factory_log)));
    root.configure().unwrap();

    let child = root.create_child_container();
    let instance = child.resolve::<Resource>().unwrap();
    assert_eq!(root.owned_instances(), 0);
    assert_eq!(child.owned_instances(), 1);

    drop(child);
    assert!(instance.released.get());
}

#[test]
fn test_dispose_on_drop_can_be_disabled() {
    let log = new_log();
    let factory_log = log.clone();

    let options = ContainerOptions {
        dispose_on_drop: false,
        ..ContainerOptions::default()
    };
    let container = Container::with_options(options);
    container.register_disposable::<Resource, _>(move |_| Ok(Resource::new("kept", &factory_log)));
    container.configure().unwrap();

    let resource = container.resolve::<Resource>().unwrap();
    drop(container);
    assert!(!resource.released.get());
}

#[test]
fn test_trait_object_disposal() {
    trait Connection: Dispose {
        fn name(&self) -> String;
    }

    impl Connection for Resource {
        fn name(&self) -> String {
            self.name.clone()
        }
    }

    let log = new_log();
    let factory_log = log.clone();

    let container = Container::new();
    container.register_disposable::<dyn Connection, _>(move |_| {
        let connection: Rc<dyn Connection> = Resource::new("conn", &factory_log);
        Ok(connection)
    });
    container.configure().unwrap();

    let connection = container.resolve::<dyn Connection>().unwrap();
    assert_eq!(connection.name(), "conn");
    drop(container);
    assert_eq!(*log.borrow(), vec!["conn"]);
}

#[test]
fn test_container_is_disposable() {
    let log = new_log();
    let factory_log = log.clone();

    let root = Container::new();
    let child = root.create_child_container();
    child.register_disposable::<Resource, _>(move |_| Ok(Resource::new("child", &factory_log)));
    child.configure().unwrap();
    let _resource = child.resolve::<Resource>().unwrap();

    fn release(resource: &dyn Dispose) {
        resource.dispose();
    }
    release(&child);

    assert_eq!(*log.borrow(), vec!["child"]);
}
