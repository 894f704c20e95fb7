//! Test helpers for composing CLI datasets on disk.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// One competitor at the origin rated 4.5, one due east rated 3.0 and one
/// row without coordinates.
pub(super) const COMPETITORS_CSV: &str = "name,lat,lon,rating\n\
    Origin Juice,0.0,0.0,4.5\n\
    Eastern Press,0.0,0.5,3.0\n\
    Pop-up Cart,,,5.0\n";

/// Two berry energy recipes, one tropical energy recipe and one detox recipe.
pub(super) const RECIPES_CSV: &str = "SmoothieID,Goal,Flavor,Ingredients,Total_Protein,Total_Fiber\n\
    S1,Energy,Berry,\"Whey, Oats, Blueberry, Oat Milk, Chia\",30,8\n\
    S2,Energy,Berry,\"Pea Protein, Quinoa, Strawberry, Almond Milk, Honey\",20,6\n\
    S3,Energy,Tropical,\"Soy, Rice, Mango, Coconut Water, Ginger\",18,7\n\
    S4,Detox,Green,\"Hemp, Buckwheat, Kale, Green Tea, Spirulina\",12,11\n";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture");
}

/// Temporary directory holding the CSV fixtures.
#[derive(Debug)]
pub(super) struct Workspace {
    _tmp: TempDir,
    pub(super) root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn competitors(&self) -> Utf8PathBuf {
        let path = self.root.join("competitors.csv");
        write_utf8(&path, COMPETITORS_CSV.as_bytes());
        path
    }

    pub(super) fn recipes(&self) -> Utf8PathBuf {
        let path = self.root.join("recipes.csv");
        write_utf8(&path, RECIPES_CSV.as_bytes());
        path
    }
}
