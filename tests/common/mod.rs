//! Common test utilities for rigger integration tests

use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const PRODUCT_DESCRIPTOR: &str =
    "name=DBeaver Ultimate\nid=com.dbeaver.ultimate\nversion=25.2.0\n";

pub const STARTUP_CONFIG: &str = "-startup\nplugins/org.eclipse.equinox.launcher.jar\n\
                                  -vm\n/opt/dbeaver/jre/bin/java\n-vmargs\n-Xmx2048m\n";

pub const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
    <modelVersion>4.0.0</modelVersion>
    <groupId>com.example</groupId>
    <artifactId>dbeaver-agent</artifactId>
    <version>25.1.0</version>
    <dependencies>
        <dependency>
            <groupId>com.dbeaver</groupId>
            <artifactId>api</artifactId>
            <version>3.0.8</version>
            <scope>system</scope>
            <systemPath>${project.basedir}/libs/com.dbeaver.lm.api_3.0.8.202504011200.jar</systemPath>
        </dependency>
        <dependency>
            <groupId>org.jkiss</groupId>
            <artifactId>utils</artifactId>
            <version>2.1.0</version>
            <scope>system</scope>
            <systemPath>${project.basedir}/libs/org.jkiss.utils_2.1.0.202504011200.jar</systemPath>
        </dependency>
    </dependencies>
</project>
"#;

pub const API_JAR: &str = "com.dbeaver.lm.api_3.0.9.202506090822.jar";
pub const UTILS_JAR: &str = "org.jkiss.utils_2.2.0.202506090822.jar";

/// Content directory inside a macOS bundle
pub const BUNDLE_CONTENT: &str = "Contents/Eclipse";

/// A fake installation next to an agent project
#[allow(dead_code)]
pub struct TestInstall {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Installation root
    pub install: PathBuf,
    /// Directory holding the product files: the root, or `Contents/Eclipse` in a bundle
    pub content: PathBuf,
    /// Agent project root
    pub project: PathBuf,
}

impl TestInstall {
    /// Create a flat Linux installation with a bundled runtime and both library jars
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let install = temp.path().join("dbeaver");
        let this = Self::populate(temp, install.clone(), install);
        this.write_install_file("dbeaver", "#!/bin/sh\n");
        this
    }

    /// Create a `DBeaver.app` bundle with the same product files under `Contents/Eclipse`
    #[allow(dead_code)]
    pub fn new_bundle() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let install = temp.path().join("DBeaver.app");
        let content = install.join(BUNDLE_CONTENT);
        let this = Self::populate(temp, install, content);
        write(&this.install.join("Contents/MacOS/dbeaver"), "#!/bin/sh\n");
        this
    }

    fn populate(temp: TempDir, install: PathBuf, content: PathBuf) -> Self {
        let project = temp.path().join("agent");
        let this = Self {
            temp,
            install,
            content,
            project,
        };
        this.write_install_file(".eclipseproduct", PRODUCT_DESCRIPTOR);
        this.write_install_file("dbeaver.ini", STARTUP_CONFIG);
        this.write_install_file("jre/bin/java", "");
        this.write_install_file(&format!("plugins/{API_JAR}"), "api");
        this.write_install_file(&format!("plugins/{UTILS_JAR}"), "utils");
        this.write_install_file("plugins/org.eclipse.core.runtime_3.31.0.jar", "");
        this.write_project_file("pom.xml", POM);
        this
    }

    /// Write a file under the installation's content directory
    pub fn write_install_file(&self, path: &str, content: &str) {
        write(&self.content.join(path), content);
    }

    /// Write a file under the project root
    pub fn write_project_file(&self, path: &str, content: &str) {
        write(&self.project.join(path), content);
    }

    /// Read a file from the installation's content directory
    pub fn read_install_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.content.join(path)).expect("Failed to read file")
    }

    /// Read a file from the project root
    pub fn read_project_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.project.join(path)).expect("Failed to read file")
    }

    /// Pretend an earlier build left its assembly in `target/`
    #[allow(dead_code)]
    pub fn create_build_output(&self, content: &str) -> PathBuf {
        let jar = self
            .project
            .join("target")
            .join("dbeaver-agent-25.2.0-jar-with-dependencies.jar");
        write(&jar, content);
        jar
    }

    pub fn install_arg(&self) -> String {
        self.install.display().to_string()
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, content).expect("Failed to write file");
}
