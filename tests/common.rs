#![allow(dead_code)]

use std::path::{Path, PathBuf};

use calamine::{open_workbook, Reader, Xlsx};
use tempfile::TempDir;

use appagenda::{Diagnostics, Output};

pub const MAIN_ORDER: &str = "\
# main conference, day 1
* Monday, June 3, 2019
+ 08:00--09:00 Breakfast # %room Exhibit Hall
+ 09:00--10:00 Keynote 1: Language and Society # %type plenary %room Ballroom
= 10:30--12:10 Oral Sessions
! Session 1A: Parsing # %room Nicollet A %chair Jane Doe %id 1A
1 10:30--10:48
2-tacl 10:48--11:06
3 11:06--11:24
! Posters 1 # %type poster %id 1P %room Hyatt Exhibit Hall
4-srw
5-demos
";

pub const BEA_ORDER: &str = "\
* Sunday, June 2, 2019
! Oral Session 1 # %room Greenway
1 09:00--09:20
2 09:20--09:40
";

pub const MAIN_MAPPING: &str = "\
# local id -> anthology id
1 N19-1001
2-tacl Q19-1002
3 N19-1003
4-srw none
5-demos N19-3001
";

pub const BEA_MAPPING: &str = "1 W19-4401\n2 none\n";

pub const N19_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<volume id="N19">
  <paper id="1001">
    <title>Fast <fixed-case>CCG</fixed-case> Parsing</title>
    <author><first>Ana</first><last>Lima</last><affiliation>ETS</affiliation></author>
    <author><first>Bo</first><last>Chen</last><affiliation>CMU</affiliation></author>
    <abstract>We parse fast.</abstract>
    <url>N19-1001</url>
  </paper>
  <paper id="1003">
    <title>Slow Parsing</title>
    <author><first>José</first><last>García</last><affiliation>UPM</affiliation></author>
    <abstract>We parse slowly.</abstract>
    <url>N19-1003</url>
    <video href="https://vimeo.com/1003"/>
  </paper>
  <paper id="3001">
    <title>A Demo System</title>
    <author><first>Jose</first><last>Garcia</last><affiliation>Google</affiliation></author>
    <url>N19-3001</url>
  </paper>
</volume>
"#;

pub const Q19_XML: &str = r#"<volume id="Q19">
  <paper id="1002">
    <title>A TACL Paper</title>
    <author><first>Cy</first><last>Diaz</last><affiliation>UW</affiliation></author>
    <url>Q19-1002</url>
  </paper>
</volume>
"#;

pub const W19_XML: &str = r#"<volume id="W19">
  <paper id="4401">
    <title>Scoring Essays</title>
    <author><first>Dee</first><last>Eve</last><affiliation>ETS</affiliation></author>
    <url>W19-4401</url>
  </paper>
</volume>
"#;

pub const MAIN_EXTRA: &str = "\
id\ttitle\tauthors\taffiliations\temails\tabstract
4-srw\tStudent Poster\tFay Gu\tUIUC\tfay@illinois.edu\tA student poster.
";

pub const BEA_EXTRA: &str = "\
id\ttitle\tauthors\taffiliations\temails\tabstract
2\tShared Task Overview\tGil Ho; Ana Lima\tNYU; ETS\tgil@nyu.edu;\tOverview.
";

pub const PLENARY: &str = "\
session\tabstract\tperson\tperson_affiliation\tperson_email\tpdf_url\tvideo_url
Keynote 1\tLanguage is social.\tRada Mihalcea\tUniversity of Michigan\tmihalcea@umich.edu\t\thttps://vimeo.com/k1
";

pub const REGISTRANTS: &str = "\
Professional Name,Email,Affiliation,Registration Type
Ana Lima,ana.lima@ets.org,ETS,Full
Zoe Park,zoe@example.org,Example U,Student
Gilbert Ho,GIL@nyu.edu,NYU,Full
Adam Ng,adam@example.com,Acme,Full
zoe  park,Zoe@Example.org,Example U,Student
";

pub const CONFIG: &str = r#"{
    "order_files": {"main": "order/main.txt", "BEA": "order/bea.txt"},
    "mapping_files": {"main": "map/main.tsv", "BEA": "map/bea.tsv"},
    "extra_metadata_files": {"main": "extra/main.tsv", "BEA": "extra/bea.tsv"},
    "xml_files": ["xml/N19.xml", "xml/Q19.xml", "xml/W19.xml"],
    "plenary_info_file": "plenary.tsv",
    "attendees_file": "registrants.csv",
    "pdf_links": true,
    "video_links": true
}"#;

/// A directory of conference inputs plus output locations
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Two events, three anthology volumes, extra metadata, plenary info
    /// and a registrant list.
    pub fn standard() -> Self {
        let fixture = Self::empty();
        fixture.write("order/main.txt", MAIN_ORDER);
        fixture.write("order/bea.txt", BEA_ORDER);
        fixture.write("map/main.tsv", MAIN_MAPPING);
        fixture.write("map/bea.tsv", BEA_MAPPING);
        fixture.write("xml/N19.xml", N19_XML);
        fixture.write("xml/Q19.xml", Q19_XML);
        fixture.write("xml/W19.xml", W19_XML);
        fixture.write("extra/main.tsv", MAIN_EXTRA);
        fixture.write("extra/bea.tsv", BEA_EXTRA);
        fixture.write("plenary.tsv", PLENARY);
        fixture.write("registrants.csv", REGISTRANTS);
        fixture.write("config.json", CONFIG);
        fixture
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        std::fs::write(&path, contents).expect("Failed to write fixture file");
        path
    }

    pub fn agenda_path(&self) -> PathBuf {
        self.path("out/agenda.xlsx")
    }

    pub fn attendees_path(&self) -> PathBuf {
        self.path("out/attendees.xlsx")
    }

    /// Run the pipeline from `config.json` into `out/`
    pub fn generate(&self) -> (appagenda::Result<Output>, Diagnostics) {
        std::fs::create_dir_all(self.path("out")).expect("Failed to create output dir");
        let mut diag = Diagnostics::new();
        let result = appagenda::generate(
            &self.path("config.json"),
            &self.agenda_path(),
            &self.attendees_path(),
            &mut diag,
        );
        (result, diag)
    }
}

/// All cells of a sheet as strings, header row first
pub fn read_sheet(path: &Path, sheet: &str) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("Failed to open workbook");
    let range = workbook
        .worksheet_range(sheet)
        .expect("Failed to read worksheet");
    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}
