//! Game and mod folder scanning.
//!
//! A render reads its assets from an ordered list of roots: the game folder
//! first, then each mod folder. Later roots override earlier ones for the
//! focus view GUI, sprite definitions, localisation and texture files.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, error, info, trace};

use treesnap::{Assets, TreeSnapError, semantic::SpriteCatalog};
use treesnap_parser::error::ParseError;

use crate::texture;

const GUI_FILE: [&str; 2] = ["interface", "nationalfocusview.gui"];
const FOCUS_DIR: [&str; 2] = ["common", "national_focus"];

/// Ordered asset roots, lowest priority first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoots {
    roots: Vec<PathBuf>,
}

impl SourceRoots {
    pub fn new(game: impl Into<PathBuf>, mods: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        let mut roots = Self {
            roots: vec![game.into()],
        };
        for root in mods {
            roots.push(root.into());
        }
        roots
    }

    fn push(&mut self, root: PathBuf) {
        if !self.roots.contains(&root) {
            self.roots.push(root);
        }
    }

    /// Adds the folder `focus_file` belongs to as the highest priority root,
    /// when the file sits under `common/national_focus`.
    pub fn with_focus_file(&self, focus_file: &Path) -> Self {
        let mut roots = self.clone();
        let focus_dir: PathBuf = FOCUS_DIR.iter().collect();
        if let Some(root) = focus_file.parent().and_then(|dir| strip_suffix(dir, &focus_dir)) {
            if root.as_os_str().is_empty() {
                roots.push(PathBuf::from("."));
            } else {
                roots.push(root.to_path_buf());
            }
        }
        roots
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// The focus view GUI of the highest priority root that declares one.
    pub fn gui_path(&self) -> Option<PathBuf> {
        self.roots
            .iter()
            .rev()
            .map(|root| GUI_FILE.iter().fold(root.clone(), |path, part| path.join(part)))
            .find(|path| path.is_file())
    }

    /// Parses the GUI, every sprite catalog and localisation file, and
    /// resolves sprite textures to files on disk.
    ///
    /// # Errors
    ///
    /// Returns [`TreeSnapError::Io`] when no root has a focus view GUI or a
    /// folder cannot be read, and [`TreeSnapError::Parse`] for a malformed file.
    pub fn load_assets(&self, language: &str) -> Result<Assets, TreeSnapError> {
        info!(root_count = self.roots.len(); "Loading assets");

        let gui_path = self.gui_path().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "no root contains interface/nationalfocusview.gui",
            )
        })?;
        let gui = parse_file(&gui_path, treesnap_parser::parse_focus_gui)?;

        let mut assets = Assets {
            gui,
            ..Assets::default()
        };
        for root in &self.roots {
            for path in files_with_extension(&root.join("interface"), "gfx")? {
                let catalog = parse_file(&path, treesnap_parser::parse_sprite_catalog)?;
                assets.catalog.merge(catalog);
            }
            let mut loc_files = files_with_extension(&root.join("localisation"), "yml")?;
            // Files under `replace` override the rest of the root.
            loc_files.sort_by_key(|path| {
                let replaces = path.components().any(|part| part.as_os_str() == "replace");
                (replaces, path.clone())
            });
            for path in loc_files {
                let table =
                    parse_file(&path, |source| treesnap_parser::parse_localisation(source, language))?;
                assets.localisation.merge(table);
            }
        }

        let resolved = self.resolve_textures(&mut assets.catalog);
        debug!(
            sprite_count = assets.catalog.len(),
            resolved,
            localised = assets.localisation.len(language);
            "Assets loaded"
        );
        Ok(assets)
    }

    /// Points every sprite at the highest priority root holding its texture
    /// and records the texture size. Returns the number of textures found.
    fn resolve_textures(&self, catalog: &mut SpriteCatalog) -> usize {
        let mut resolved = 0;
        for sprite in catalog.sprites_mut() {
            let relative = sprite.texture().replace('\\', "/");
            let Some(path) = self
                .roots
                .iter()
                .rev()
                .map(|root| root.join(&relative))
                .find(|path| path.is_file())
            else {
                trace!(sprite:% = sprite.name(), texture = relative; "Texture not found");
                continue;
            };
            if let Some(size) = texture::probe_size(&path) {
                sprite.set_texture_size(size);
            }
            sprite.set_texture(path.display().to_string());
            resolved += 1;
        }
        resolved
    }
}

fn strip_suffix<'a>(path: &'a Path, suffix: &Path) -> Option<&'a Path> {
    let mut path = path;
    for part in suffix.components().rev() {
        if path.file_name()? != part.as_os_str() {
            return None;
        }
        path = path.parent()?;
    }
    Some(path)
}

/// Reads and parses one script file, keeping its source for diagnostics.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn parse_file<T>(
    path: &Path,
    parse: impl FnOnce(&str) -> Result<T, ParseError>,
) -> Result<T, TreeSnapError> {
    trace!(path = path.display().to_string(); "Parsing file");
    let bytes = fs::read(path)?;
    let source = String::from_utf8_lossy(&bytes);
    parse(&source).map_err(|err| {
        error!(path = path.display().to_string(), err:err; "Failed to parse file");
        TreeSnapError::new_parse_error(err, source)
    })
}

/// Files under `dir` with extension `ext`, recursively, sorted by path.
///
/// A missing directory yields no files.
fn files_with_extension(dir: &Path, ext: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if !dir.is_dir() {
        return Ok(files);
    }
    let mut pending = vec![dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path
                .extension()
                .and_then(|found| found.to_str())
                .is_some_and(|found| found.eq_ignore_ascii_case(ext))
            {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use treesnap::identifier::Id;

    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_focus_file_root_is_added_last() {
        let roots = SourceRoots::new("/game", ["/mods/a"]);
        let with_tree =
            roots.with_focus_file(Path::new("/mods/b/common/national_focus/germany.txt"));
        assert_eq!(
            with_tree.roots(),
            [
                PathBuf::from("/game"),
                PathBuf::from("/mods/a"),
                PathBuf::from("/mods/b")
            ]
        );

        let unchanged = roots.with_focus_file(Path::new("/game/common/national_focus/x.txt"));
        assert_eq!(unchanged, roots);

        let elsewhere = roots.with_focus_file(Path::new("/tmp/tree.txt"));
        assert_eq!(elsewhere, roots);
    }

    #[test]
    fn test_later_roots_override() {
        let game = tempfile::tempdir().unwrap();
        let modded = tempfile::tempdir().unwrap();

        write(
            game.path(),
            "interface/nationalfocusview.gui",
            "guiTypes = { positionType = { name = \"focus_spacing\" position = { x = 96 y = 130 } } }",
        );
        write(
            modded.path(),
            "interface/nationalfocusview.gui",
            "guiTypes = { positionType = { name = \"focus_spacing\" position = { x = 100 y = 140 } } }",
        );
        write(
            game.path(),
            "interface/goals.gfx",
            "spriteTypes = { spriteType = { name = \"GFX_goal_unknown\" texturefile = \"gfx\\goal_unknown.png\" } }",
        );
        write(
            game.path(),
            "localisation/english/focus_l_english.yml",
            "l_english:\n GER_army:0 \"Army\"\n GER_navy:0 \"Navy\"\n",
        );
        write(
            modded.path(),
            "localisation/replace/focus_l_english.yml",
            "l_english:\n GER_army:0 \"Army Innovations\"\n",
        );
        fs::create_dir_all(modded.path().join("gfx")).unwrap();
        image::RgbaImage::new(94, 86)
            .save(modded.path().join("gfx/goal_unknown.png"))
            .unwrap();

        let roots = SourceRoots::new(game.path(), [modded.path()]);
        let assets = roots.load_assets("l_english").unwrap();

        assert_eq!(assets.gui.spacing.focus.x(), 100);
        assert_eq!(
            assets.localisation.get("l_english", Id::new("GER_army")),
            Some("Army Innovations")
        );
        assert_eq!(
            assets.localisation.get("l_english", Id::new("GER_navy")),
            Some("Navy")
        );

        let sprite = assets.catalog.sprite(Id::new("GFX_goal_unknown")).unwrap();
        assert!(sprite.texture().starts_with(&modded.path().display().to_string()));
        assert_eq!(
            sprite.texture_size().map(|size| (size.width(), size.height())),
            Some((94, 86))
        );
    }

    #[test]
    fn test_missing_gui_is_an_error() {
        let game = tempfile::tempdir().unwrap();
        let roots = SourceRoots::new(game.path(), Vec::<PathBuf>::new());
        assert!(matches!(
            roots.load_assets("l_english"),
            Err(TreeSnapError::Io(_))
        ));
    }

    #[test]
    fn test_malformed_file_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad.gfx", "spriteTypes = { a = ¬ }");

        let err = parse_file(
            &dir.path().join("bad.gfx"),
            treesnap_parser::parse_sprite_catalog,
        )
        .unwrap_err();
        let TreeSnapError::Parse { src, .. } = err else {
            panic!("expected a parse error");
        };
        assert!(src.contains("spriteTypes"));
    }
}
