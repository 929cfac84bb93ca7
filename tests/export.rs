use std::fs;

use econ_diagram::{
    export::{ExportFormat, JsonSink},
    library,
    renderer::Renderer,
    types::{Canvas, Dimensions},
    RenderError,
};

#[test]
fn svg_export_writes_a_document() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let concept = library::absolute_advantage();
    let renderer = Renderer::default();
    let canvas = renderer.render_frame(&concept, 1)?;

    let path = dir.path().join("absolute_advantage_t1.svg");
    renderer.export(canvas, &path, 72)?;

    let svg = fs::read_to_string(&path)?;
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Absolute Advantage (t=1)"));
    assert!(svg.contains("<polygon"));
    Ok(())
}

#[test]
fn json_export_dumps_the_display_list() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let concept = library::market_equilibrium();
    let renderer = Renderer::default().with_sink(Box::new(JsonSink));
    let canvas = renderer.render_frame(&concept, 0)?;
    let expected = canvas.clone();

    let path = dir.path().join("market_equilibrium_t0.json");
    renderer.export(canvas, &path, 300)?;

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(value["dpi"], 300);
    let back: Canvas = serde_json::from_value(value["canvas"].clone())?;
    assert_eq!(back.len(), expected.len());
    assert_eq!(back.circle_count(), expected.circle_count());
    assert_eq!(back.arrow_count(), expected.arrow_count());
    assert_eq!(back.text_count(), expected.text_count());
    assert_eq!(back.bounds, expected.bounds);
    Ok(())
}

#[test]
fn export_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("frame.svg");
    let renderer = Renderer::new(Dimensions::default()).with_sink(ExportFormat::Svg.sink());
    let canvas = renderer.initialize_canvas();

    let err = renderer.export(canvas, &path, 300).unwrap_err();
    assert!(matches!(err, RenderError::Io { .. }));
}

#[test]
fn authored_concept_loads_from_json() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("barter.json");
    fs::write(
        &path,
        r##"{
            "name": "Barter",
            "description": "Two people swap goods directly",
            "meta": {
                "agent_types": ["individual"],
                "scale_level": "micro",
                "interaction_pattern": "bilateral",
                "information_structure": "perfect",
                "time_structure": "static",
                "decision_scope": ["trade"]
            },
            "frames": [{
                "t": 0,
                "agents": [
                    {"kind": "individual", "id": "P1", "position": {"x": -2.0, "y": 0.0}, "color": "#7FB3D5"},
                    {"kind": "individual", "id": "P2", "position": {"x": 2.0, "y": 0.0}}
                ],
                "flows": [
                    {"from": {"x": -1.5, "y": 0.0}, "to": {"x": 1.5, "y": 0.0}, "label": "fish", "color": "teal"}
                ]
            }]
        }"##,
    )?;

    let concept = library::load_concept(&path)?;
    assert_eq!(concept.file_stem(), "barter");
    let canvas = Renderer::default().render_frame(&concept, 0)?;
    assert_eq!(canvas.circle_count(), 2);
    assert_eq!(canvas.arrow_count(), 1);
    // Flow label and title.
    assert_eq!(canvas.text_count(), 2);
    Ok(())
}

#[test]
fn malformed_concept_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"name\": 3}").unwrap();

    match library::load_concept(&path) {
        Err(RenderError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}
