use super::*;

#[test]
fn test_creates_temp_dir_and_writes_file() -> FixtureResult<()> {
    let fixture = TempDirFixture::new()?;

    fixture.write_file("themes/a/layouts/index.html", "<html>")?;

    assert!(fixture.file_exists("themes/a/layouts/index.html"));
    assert_eq!(fixture.read_file("themes/a/layouts/index.html")?, "<html>");
    assert!(fixture.join("themes/a/layouts").is_dir());
    Ok(())
}

#[test]
fn test_temp_dir_isolation() -> FixtureResult<()> {
    let first = TempDirFixture::new()?;
    let second = TempDirFixture::new()?;

    assert_ne!(first.path(), second.path());

    first.write_file("go.mod", "module a")?;
    assert!(first.file_exists("go.mod"));
    assert!(!second.file_exists("go.mod"));
    Ok(())
}

#[test]
fn test_write_component_declares_imports() -> FixtureResult<()> {
    let fixture = TempDirFixture::new()?;

    fixture.write_component("themes/a", &["b", "github.com/c/theme"])?;

    assert_eq!(
        fixture.read_file("themes/a/config.toml")?,
        "theme = [\"b\", \"github.com/c/theme\"]\n"
    );
    Ok(())
}

#[test]
fn test_directory_removed_on_drop() -> FixtureResult<()> {
    let fixture = TempDirFixture::new()?;
    fixture.create_dir("_vendor")?;
    let root = fixture.path().to_path_buf();

    drop(fixture);

    assert!(!root.exists());
    Ok(())
}
