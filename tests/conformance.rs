//! Generated code compiled against real mappers.
//!
//! `tests/fixtures/conformance/` holds the units mapwire emits for
//! `declarations.rs`. They are `include!`d below next to hand-written
//! bodies for the declared methods and a small container, so the wrappers,
//! resolver and registry are type-checked and exercised here.
//! `test_fixture_matches_generator_output` keeps the fixture in step with the
//! emitters.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use mapwire::config::DiDetection;
use mapwire::{generate, Compilation, Config, ModulePath, SourceUnit};

include!("fixtures/conformance/mapwire.rs");

pub mod models {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Car {
        pub make: String,
        pub year: u16,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CarDto {
        pub make: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CarSummary {
        pub label: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CarView {
        pub title: String,
        pub vintage: bool,
    }
}

pub mod mappers {
    use crate::models::{Car, CarDto};

    #[derive(Debug, Default)]
    pub struct CarMapper;

    impl CarMapper {
        pub fn to_dto(&self, car: Car) -> CarDto {
            CarDto { make: car.make }
        }
    }

    pub mod car_maps {
        use crate::models::{Car, CarSummary};

        pub fn to_summary(car: Car) -> CarSummary {
            CarSummary {
                label: format!("{} ({})", car.make, car.year),
            }
        }
    }

    pub mod car_views {
        use crate::models::{Car, CarView};

        pub trait CarViews {
            fn to_view(self) -> CarView;
        }

        impl CarViews for Car {
            fn to_view(self) -> CarView {
                CarView {
                    vintage: self.year < 1990,
                    title: self.make.to_uppercase(),
                }
            }
        }
    }
}

/// Minimal container with the registration surface the registry calls.
pub mod di {
    use std::any::{Any, TypeId};
    use std::collections::HashMap;
    use std::rc::Rc;
    use std::sync::Arc;

    type Factory = Rc<dyn Fn(&Provider) -> Box<dyn Any>>;

    #[derive(Default)]
    pub struct Services {
        factories: HashMap<TypeId, Factory>,
        lifetimes: Vec<&'static str>,
    }

    impl Services {
        pub fn add_scoped<T: ?Sized + 'static>(
            &mut self,
            factory: impl Fn(&Provider) -> Arc<T> + 'static,
        ) -> &mut Self {
            self.add("scoped", factory)
        }

        pub fn add_transient<T: ?Sized + 'static>(
            &mut self,
            factory: impl Fn(&Provider) -> Arc<T> + 'static,
        ) -> &mut Self {
            self.add("transient", factory)
        }

        pub fn add_singleton<T: ?Sized + 'static>(
            &mut self,
            factory: impl Fn(&Provider) -> Arc<T> + 'static,
        ) -> &mut Self {
            self.add("singleton", factory)
        }

        fn add<T: ?Sized + 'static>(
            &mut self,
            lifetime: &'static str,
            factory: impl Fn(&Provider) -> Arc<T> + 'static,
        ) -> &mut Self {
            let factory: Factory = Rc::new(move |provider: &Provider| -> Box<dyn Any> {
                Box::new(factory(provider))
            });
            self.factories.insert(TypeId::of::<T>(), factory);
            self.lifetimes.push(lifetime);
            self
        }

        pub fn len(&self) -> usize {
            self.lifetimes.len()
        }

        pub fn lifetimes(&self) -> &[&'static str] {
            &self.lifetimes
        }

        pub fn build(&self) -> Provider {
            Provider {
                factories: Rc::new(self.factories.clone()),
            }
        }
    }

    #[derive(Clone)]
    pub struct Provider {
        factories: Rc<HashMap<TypeId, Factory>>,
    }

    impl Provider {
        pub fn get_required<T: ?Sized + 'static>(&self) -> Arc<T> {
            let Some(factory) = self.factories.get(&TypeId::of::<T>()) else {
                panic!("no registration for {}", std::any::type_name::<T>());
            };
            match factory(self).downcast::<Arc<T>>() {
                Ok(service) => *service,
                Err(_) => panic!("registration for {} has the wrong type", std::any::type_name::<T>()),
            }
        }
    }
}

use crate::mappers::car_views::CarViews;
use crate::models::{Car, CarDto, CarSummary, CarView};

fn car(year: u16) -> Car {
    Car {
        make: "Volvo".to_string(),
        year,
    }
}

fn provider() -> di::Provider {
    let mut services = di::Services::default();
    services.add_mappers();
    services.build()
}

// ============================================================================
// Wrappers
// ============================================================================

#[test]
fn test_instance_wrapper_matches_direct_call() {
    let mapper = mappers::CarMapper;
    assert_eq!(Map::map(&mapper, car(1987)), mapper.to_dto(car(1987)));
}

#[test]
fn test_static_wrapper_matches_direct_call() {
    let wrapper = mappers__car_maps__to_summary__Adapter;
    let mapped: CarSummary = Map::map(&wrapper, car(2004));
    assert_eq!(mapped, mappers::car_maps::to_summary(car(2004)));
    assert_eq!(mapped.label, "Volvo (2004)");
}

#[test]
fn test_extension_wrapper_matches_direct_call() {
    let wrapper = mappers__car_views__to_view__Adapter;
    let mapped: CarView = Map::map(&wrapper, car(1975));
    assert_eq!(mapped, car(1975).to_view());
    assert!(mapped.vintage);
}

#[test]
fn test_wrappers_are_usable_as_trait_objects() {
    let to_dto: Box<dyn Map<Car, CarDto>> = Box::new(mappers::CarMapper);
    let to_summary: Box<dyn Map<Car, CarSummary>> = Box::new(mappers__car_maps__to_summary__Adapter);

    assert_eq!(Map::map(&*to_dto, car(2020)).make, "Volvo");
    assert_eq!(Map::map(&*to_summary, car(2020)).label, "Volvo (2020)");
}

// ============================================================================
// Registry and resolver
// ============================================================================

#[test]
fn test_registry_registers_resolver_and_every_wrapper() {
    let mut services = di::Services::default();
    let returned = services.add_mappers().len();

    assert_eq!(returned, 4);
    assert!(services.lifetimes().iter().all(|lifetime| *lifetime == "scoped"));
}

#[test]
fn test_container_resolves_each_pair() {
    let provider = provider();

    let to_dto = provider.get_required::<dyn Map<Car, CarDto>>();
    assert_eq!(Map::map(&*to_dto, car(1999)), CarDto { make: "Volvo".to_string() });

    let to_view = provider.get_required::<dyn Map<Car, CarView>>();
    assert_eq!(Map::map(&*to_view, car(1999)), car(1999).to_view());
}

#[test]
fn test_resolver_dispatches_by_type_pair() {
    let provider = provider();
    let resolver = provider.get_required::<MapResolver>();

    let dto: CarDto = Mapper::map(&*resolver, car(2010));
    let summary: CarSummary = Mapper::map(&*resolver, car(2010));
    let view: CarView = Mapper::map(&*resolver, car(2010));

    assert_eq!(dto, mappers::CarMapper.to_dto(car(2010)));
    assert_eq!(summary, mappers::car_maps::to_summary(car(2010)));
    assert_eq!(view, car(2010).to_view());
}

#[test]
#[should_panic(expected = "no registration")]
fn test_resolver_fails_on_first_use_of_unregistered_pair() {
    let resolver = MapResolver::new(provider());
    let _: CarDto = Mapper::map(&resolver, CarSummary { label: String::new() });
}

// ============================================================================
// Fixture freshness
// ============================================================================

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/conformance")
}

/// Token text of a Rust file, independent of formatting, comments and the
/// trailing commas prettyplease adds when it wraps a list.
fn tokens(name: &str, source: &str) -> String {
    match syn::parse_file(source) {
        Ok(file) => quote::quote!(#file)
            .to_string()
            .replace(", )", ")")
            .replace(", >", ">")
            .replace(", }", "}"),
        Err(err) => panic!("{} does not parse: {}", name, err),
    }
}

#[test]
fn test_fixture_matches_generator_output() {
    let dir = fixture_dir();
    let declarations = std::fs::read_to_string(dir.join("declarations.rs")).unwrap();
    let compilation = Compilation::new().with_unit(SourceUnit::new(
        "src/mappers.rs",
        ModulePath::from_segments(["mappers"]),
        declarations,
    ));

    let mut config = Config::default();
    config.di.detection = DiDetection::Always;
    config.di.container = "crate::di::Services".to_string();
    config.di.provider = "crate::di::Provider".to_string();
    let generation = generate(config, &compilation).unwrap();

    let generated: BTreeSet<&str> = generation.sources.names().collect();
    let committed: BTreeSet<String> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".mapwire.rs"))
        .collect();
    assert_eq!(
        generated,
        committed.iter().map(String::as_str).collect::<BTreeSet<_>>()
    );

    for unit in generation.sources.iter() {
        let fixture = std::fs::read_to_string(dir.join(&unit.name)).unwrap();
        assert_eq!(
            tokens(&unit.name, &unit.source),
            tokens(&unit.name, &fixture),
            "fixture {} is out of date",
            unit.name
        );
    }

    let index = std::fs::read_to_string(dir.join("mapwire.rs")).unwrap();
    assert_eq!(generation.sources.index_source(), index);
}
