//! Test helpers for writing game and rider files into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub(super) const GRAND_TOUR_GAME: &str = r#"
[game]
name = "Tour de Test"
type = "GRAND_TOUR"
url = "https://www.velogames.com/test/riders.php"

[game.tab]
name = 1
team = 2
class = 3
score = 6
cost = 4
"#;

pub(super) const STAGE_RACE_GAME: &str = r#"
[game]
name = "Test Dauphine"
type = "STAGE_RACE"
budget = 100
"#;

/// First nine lines meet every grand tour quota with C3 as the surplus rider.
pub(super) const GRAND_TOUR_RIDERS: &str = "\
L1,Team A,All Rounder,900,19
L2,Team B,All Rounder,800,18
C1,Team A,Climber,600,14
C2,Team C,Climber,500,12
S1,Team B,Sprinter,450,12
U1,Team C,Unclassed,200,6
U2,Team A,Unclassed,150,5
U3,Team B,Unclassed,100,4
C3,Team C,Climber,400,10
L3,Team D,All Rounder,700,16
S2,Team D,Sprinter,350,8
U4,Team D,Unclassed,50,4
";

/// Ten equally priced riders; R10 scores lowest.
pub(super) const STAGE_RACE_RIDERS: &str = "\
R1,Team A,190,10
R2,Team A,180,10
R3,Team B,170,10

R4,Team B,160,10
R5,Team C,150,10
R6,Team C,140,10
R7,Team D,130,10
R8,Team D,120,10
R9,Team E,110,10
R10,Team E,100,10
";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// A temporary directory holding test input files.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        write_utf8(&path, contents.as_bytes());
        path
    }
}
