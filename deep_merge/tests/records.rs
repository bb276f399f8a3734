//! Fill-only and overwrite behaviour for derived records.

use std::collections::BTreeMap;

use anyhow::{Result, ensure};
use deep_merge::{DeepMerge, MergeOptions, Shape, merge, merge_with_options, merge_with_overwrite};
use rstest::{fixture, rstest};

#[derive(Clone, Debug, Default, PartialEq, DeepMerge)]
struct Tls {
    cert: String,
    key: String,
}

#[derive(Clone, Debug, Default, PartialEq, DeepMerge)]
struct Service {
    name: String,
    port: u16,
    debug: bool,
    tls: Option<Tls>,
    env: BTreeMap<String, String>,
    args: Vec<String>,
    #[deep_merge(skip)]
    revision: u64,
}

#[fixture]
fn defaults() -> Service {
    Service {
        name: "svc".into(),
        port: 8080,
        debug: false,
        tls: Some(Tls {
            cert: "/etc/default.pem".into(),
            key: String::new(),
        }),
        env: BTreeMap::from([("RUST_LOG".into(), "info".into())]),
        args: vec!["--serve".into()],
        revision: 9,
    }
}

#[rstest]
fn fill_only_keeps_configured_values(defaults: Service) -> Result<()> {
    let mut dst = Service {
        name: "api".into(),
        tls: Some(Tls::default()),
        ..Service::default()
    };
    merge(&mut dst, &defaults, "")?;
    ensure!(dst.name == "api", "name was overwritten: {dst:?}");
    ensure!(dst.port == 8080, "port not filled: {dst:?}");
    ensure!(
        dst.tls
            == Some(Tls {
                cert: "/etc/default.pem".into(),
                key: String::new(),
            }),
        "tls not merged field by field: {dst:?}"
    );
    ensure!(dst.env.get("RUST_LOG").map(String::as_str) == Some("info"), "{dst:?}");
    ensure!(dst.args == ["--serve"], "args not filled: {dst:?}");
    Ok(())
}

#[rstest]
fn overwrite_prefers_non_empty_source_values(defaults: Service) -> Result<()> {
    let mut dst = Service {
        name: "api".into(),
        port: 9000,
        debug: true,
        args: vec!["--check".into()],
        ..Service::default()
    };
    merge_with_overwrite(&mut dst, &defaults, "")?;
    ensure!(dst.name == "svc", "name kept: {dst:?}");
    ensure!(dst.port == 8080, "port kept: {dst:?}");
    ensure!(dst.debug, "empty source flag must not clear the destination");
    ensure!(dst.args == ["--serve"], "args not replaced: {dst:?}");
    Ok(())
}

#[rstest]
fn skipped_fields_are_never_touched(defaults: Service) -> Result<()> {
    let mut dst = Service::default();
    merge_with_overwrite(&mut dst, &defaults, "")?;
    ensure!(dst.revision == 0, "skipped field merged: {dst:?}");
    Ok(())
}

#[rstest]
fn records_report_their_shape_and_emptiness() {
    let mut service = Service {
        revision: 3,
        ..Service::default()
    };
    assert_eq!(service.shape(), Shape::Record);
    assert!(service.is_empty_value(), "skipped fields do not count");
    service.port = 1;
    assert!(!service.is_empty_value());
}

#[rstest]
#[case::fill(false)]
#[case::overwrite(true)]
fn empty_destination_equals_source_either_way(
    defaults: Service,
    #[case] overwrite: bool,
) -> Result<()> {
    let mut dst = Service::default();
    merge_with_options(&mut dst, &defaults, &MergeOptions::new().overwrite(overwrite))?;
    let expected = Service {
        revision: 0,
        ..defaults
    };
    ensure!(dst == expected, "unexpected merge: {dst:?}");
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeepMerge)]
struct Window(String, u32);

#[derive(Clone, Debug, PartialEq, DeepMerge)]
struct Marker;

#[rstest]
fn tuple_and_unit_records_merge() -> Result<()> {
    let mut window = Window(String::new(), 640);
    merge(&mut window, &Window("main".into(), 800), "")?;
    ensure!(window == Window("main".into(), 640), "got {window:?}");

    let mut marker = Marker;
    merge_with_overwrite(&mut marker, &Marker, "")?;
    ensure!(marker.is_empty_value(), "unit records are always empty");
    Ok(())
}

#[derive(Clone, Debug, PartialEq, DeepMerge)]
struct Layer<T> {
    value: T,
    fallback: Option<T>,
}

#[rstest]
fn generic_records_merge_their_parameters() -> Result<()> {
    let mut layer = Layer {
        value: 0_u32,
        fallback: None,
    };
    merge(
        &mut layer,
        &Layer {
            value: 7,
            fallback: Some(1),
        },
        "",
    )?;
    ensure!(layer == Layer { value: 7, fallback: Some(1) }, "got {layer:?}");
    Ok(())
}
