//! End-to-end run of an ee -> ZH -> mumu X selection over a small event file.

use analyzers::{Analyzer, AnalyzerError, create_sequence};
use configuration::{ErrorPolicy, settings_from_str};
use events::Event;
use looper::{Looper, LooperError};
use std::cell::RefCell;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;

const EVENTS: &[&str] = &[
    // Z -> mu mu at rest, a photon close to the mu-, a hard pion, a soft electron and
    // the decayed Z itself.
    r#"{"collections": {"GenParticle": [
        {"pdgid": 13, "charge": -1, "e": 45.5, "px": 45.5, "py": 0.0, "pz": 0.0},
        {"pdgid": -13, "charge": 1, "e": 45.5, "px": -45.5, "py": 0.0, "pz": 0.0},
        {"pdgid": 22, "e": 2.0, "px": 1.99, "py": 0.2, "pz": 0.0},
        {"pdgid": 211, "charge": 1, "e": 60.0, "px": 0.0, "py": 60.0, "pz": 0.0},
        {"pdgid": 11, "charge": -1, "e": 5.0, "px": 0.0, "py": -5.0, "pz": 0.0},
        {"pdgid": 23, "status": 62, "e": 91.0, "px": 0.0, "py": 0.0, "pz": 0.0}
    ]}}"#,
    // A single muon: no Z candidate.
    r#"{"collections": {"GenParticle": [
        {"pdgid": 13, "charge": -1, "e": 30.0, "px": 30.0, "py": 0.0, "pz": 0.0}
    ]}}"#,
    // The generator collection is missing.
    r#"{"collections": {}}"#,
];

fn config(path: &Path, on_error: &str) -> String {
    format!(
        r#"
random_seed = 3735928559

[collider]
beams = "ee"
sqrts = 240.0

[looper]
on_error = "{on_error}"

[[components]]
name = "ee_ZH_Zmumu"
files = [{path:?}]

[[sequence]]
kind = "reader"
name = "source"
collections = {{ gen_particles = "GenParticle" }}

[[sequence]]
kind = "selector"
name = "gen_particles_stable"
output = "gen_particles_stable"
input_objects = "gen_particles"
filter = {{ status = 1 }}

[[sequence]]
kind = "selector"
name = "leptons_true"
output = "leptons_true"
input_objects = "gen_particles_stable"
filter = {{ min_energy = 10.0, abs_pdgids = [11, 13] }}

[[sequence]]
kind = "isolation"
name = "iso_leptons"
leptons = "leptons_true"
particles = "gen_particles_stable"
iso_area = {{ shape = "eta_phi_circle", radius = 0.4 }}

[[sequence]]
kind = "selector"
name = "sel_iso_leptons"
output = "sel_iso_leptons"
input_objects = "leptons_true"
filter = {{ max_rel_iso = 0.3 }}

[[sequence]]
kind = "resonance_builder"
name = "zeds"
output = "zeds"
leg_collection = "sel_iso_leptons"
pdgid = 23

[[sequence]]
kind = "recoil_builder"
name = "recoil"
output = "recoil"
object = "zeds"
"#,
        on_error = on_error,
        path = path.display().to_string(),
    )
}

/// What the capture analyzer saw at the end of the sequence.
#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    iev: u64,
    zed_masses: Vec<f64>,
    leg_pdgids: Vec<i32>,
    recoil_masses: Vec<f64>,
    stable: usize,
}

struct Capture {
    seen: Rc<RefCell<Vec<Snapshot>>>,
}

impl Analyzer for Capture {
    fn name(&self) -> &str {
        "capture"
    }

    fn process(&mut self, event: &mut Event) -> Result<(), AnalyzerError> {
        self.seen.borrow_mut().push(Snapshot {
            iev: event.iev(),
            zed_masses: event.resonances("zeds")?.iter().map(|z| z.m()).collect(),
            leg_pdgids: event.particles("zeds_legs")?.iter().map(|p| p.pdgid).collect(),
            recoil_masses: event.particles("recoil")?.iter().map(|p| p.m()).collect(),
            stable: event.particles("gen_particles_stable")?.len(),
        });
        Ok(())
    }
}

fn write_events(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("ee_ZH_Zmumu.jsonl");
    let mut file = std::fs::File::create(&path).unwrap();
    for event in EVENTS {
        // One record per line.
        writeln!(file, "{}", event.split_whitespace().collect::<Vec<_>>().join(" ")).unwrap();
    }
    path
}

fn looper_with_capture(toml: &str) -> (Looper, Rc<RefCell<Vec<Snapshot>>>) {
    let settings = settings_from_str(toml).unwrap();
    let mut sequence = create_sequence(&settings.sequence, &settings.context()).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    sequence.push(Box::new(Capture { seen: seen.clone() }));
    let looper = Looper::new(settings.looper.clone(), settings.components.clone(), sequence).with_progress(false);
    (looper, seen)
}

#[test]
fn reconstructs_z_and_recoil() {
    let dir = TempDir::new().unwrap();
    let path = write_events(&dir);
    let (mut looper, seen) = looper_with_capture(&config(&path, "skip_event"));

    let summary = looper.run().unwrap();

    assert_eq!(summary.components[0].events_read, 3);
    assert_eq!(summary.events_processed(), 2);
    assert_eq!(summary.events_failed(), 1);
    let reader = summary.analyzers.iter().find(|a| a.name == "source").unwrap();
    assert_eq!(reader.failures, 1);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);

    let zh = &seen[0];
    assert_eq!(zh.iev, 0);
    assert_eq!(zh.stable, 5);
    assert_eq!(zh.zed_masses.len(), 1);
    assert!((zh.zed_masses[0] - 91.0).abs() < 1e-9);
    assert_eq!(zh.leg_pdgids, vec![13, -13]);
    assert_eq!(zh.recoil_masses.len(), 1);
    assert!((zh.recoil_masses[0] - 149.0).abs() < 1e-9);

    let single = &seen[1];
    assert_eq!(single.iev, 1);
    assert!(single.zed_masses.is_empty());
    assert!(single.leg_pdgids.is_empty());
    assert!(single.recoil_masses.is_empty());
}

#[test]
fn abort_policy_stops_at_the_broken_event() {
    let dir = TempDir::new().unwrap();
    let path = write_events(&dir);
    let (mut looper, seen) = looper_with_capture(&config(&path, "abort"));

    let err = looper.run().unwrap_err();

    match err {
        LooperError::Analyzer { analyzer, iev, source, .. } => {
            assert_eq!(analyzer, "source");
            assert_eq!(iev, 2);
            assert!(matches!(source, AnalyzerError::MissingStoreCollection(name) if name == "GenParticle"));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn unknown_pdgid_fails_before_reading_events() {
    let dir = TempDir::new().unwrap();
    let path = write_events(&dir);
    let toml = config(&path, "abort").replace("pdgid = 23", "pdgid = 22");
    let settings = settings_from_str(&toml).unwrap();
    assert_eq!(settings.looper.on_error, ErrorPolicy::Abort);

    let err = Looper::from_settings(&settings).err().unwrap();
    assert!(matches!(err, LooperError::Build(AnalyzerError::Build { analyzer, .. }) if analyzer == "zeds"));
}
