//! Canned catalogs and record builders.
//!
//! Timestamps are offsets from a fixed base so creation-time ordering is
//! deterministic.

use chrono::{DateTime, Duration, TimeZone, Utc};

use granth_catalog::CatalogSnapshot;
use granth_core::models::{Access, Combo, Paper, PdfDocument, Price, SubFolder, Tab, User, Role};

pub const PAPER_7: &str = "paper-7";
pub const TAB_HISTORY: &str = "tab-history";
pub const FOLDER_ANCIENT: &str = "folder-ancient";
pub const PDF_NOTES_A: &str = "pdf-notes-a";
pub const PDF_NOTES_B: &str = "pdf-notes-b";
pub const NOTES_B_PRICE: u32 = 99;

/// Fixed base time plus `secs`.
pub fn at(secs: i64) -> DateTime<Utc> {
    let base = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    base + Duration::seconds(secs)
}

pub fn rupees(amount: u32) -> Price {
    Price::rupees(amount).expect("fixture prices are positive")
}

pub fn paper(id: &str, name: &str, number: u32) -> Paper {
    Paper {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{name} syllabus"),
        paper_number: number,
        created_at: at(i64::from(number)),
    }
}

pub fn tab(id: &str, name: &str, paper_id: &str) -> Tab {
    Tab {
        id: id.to_string(),
        name: name.to_string(),
        paper_id: paper_id.to_string(),
        created_at: at(0),
    }
}

/// Folder created `created_secs` after the base time.
pub fn sub_folder(id: &str, name: &str, parent: &Tab, created_secs: i64) -> SubFolder {
    SubFolder {
        id: id.to_string(),
        name: name.to_string(),
        paper_id: parent.paper_id.clone(),
        tab_id: parent.id.clone(),
        created_at: at(created_secs),
    }
}

pub fn pdf(id: &str, name: &str, description: &str, access: Access, parent: &SubFolder) -> PdfDocument {
    PdfDocument {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        asset_link: format!("https://drive.example.com/{id}"),
        access,
        paper_id: parent.paper_id.clone(),
        tab_id: parent.tab_id.clone(),
        sub_folder_id: parent.id.clone(),
        created_at: at(0),
    }
}

pub fn combo(id: &str, name: &str, access: Access, members: &[&str], created_secs: i64) -> Combo {
    Combo::new(
        id,
        name,
        format!("{name} bundle"),
        access,
        members.iter().map(|m| m.to_string()),
        at(created_secs),
    )
}

pub fn student() -> User {
    User {
        id: "user-student".to_string(),
        full_name: "Asha Verma".to_string(),
        email: "asha@example.com".to_string(),
        mobile_number: Some("9876543210".to_string()),
        role: Role::Student,
    }
}

pub fn admin() -> User {
    User {
        id: "user-admin".to_string(),
        full_name: "Console Admin".to_string(),
        email: "admin@example.com".to_string(),
        mobile_number: None,
        role: Role::Admin,
    }
}

/// Paper 7 → History → Ancient → { Notes A (free), Notes B (paid ₹99) }.
pub fn paper_seven() -> CatalogSnapshot {
    let paper = paper(PAPER_7, "Paper 7", 7);
    let history = tab(TAB_HISTORY, "History", PAPER_7);
    let ancient = sub_folder(FOLDER_ANCIENT, "Ancient", &history, 10);
    let notes_a = pdf(PDF_NOTES_A, "Notes A", "Indus valley summary", Access::Free, &ancient);
    let notes_b = pdf(
        PDF_NOTES_B,
        "Notes B",
        "Mauryan empire deep dive",
        Access::paid(rupees(NOTES_B_PRICE)),
        &ancient,
    );
    CatalogSnapshot {
        papers: vec![paper],
        tabs: vec![history],
        sub_folders: vec![ancient],
        pdfs: vec![notes_b, notes_a],
        combos: Vec::new(),
    }
}

/// Paper 7 plus a second paper and two combos.
///
/// Records are inserted out of display order so ordering is exercised.
pub fn syllabus() -> CatalogSnapshot {
    let mut snapshot = paper_seven();

    let geography_paper = paper("paper-2", "Paper 2", 2);
    let physical = tab("tab-physical", "Physical", "paper-2");
    let economic = tab("tab-economic", "Economic", "paper-2");
    let rivers = sub_folder("folder-rivers", "Rivers", &physical, 30);
    let climate = sub_folder("folder-climate", "Climate", &physical, 20);
    let trade = sub_folder("folder-trade", "Trade", &economic, 5);

    let medieval = sub_folder(
        "folder-medieval",
        "Medieval",
        &tab(TAB_HISTORY, "History", PAPER_7),
        40,
    );

    snapshot.papers.insert(0, geography_paper);
    snapshot.tabs.extend([physical, economic]);
    snapshot.sub_folders.extend([rivers.clone(), climate.clone(), trade.clone(), medieval.clone()]);
    snapshot.pdfs.extend([
        pdf("pdf-ganga", "Ganga Basin", "River systems of the north", Access::Free, &rivers),
        pdf("pdf-monsoon", "Monsoon", "Climate patterns", Access::paid(rupees(49)), &climate),
        pdf("pdf-exports", "Exports", "Trade balance notes", Access::Free, &trade),
        pdf("pdf-delhi", "Delhi Sultanate", "Medieval polity", Access::Free, &medieval),
    ]);
    snapshot.combos = vec![
        combo(
            "combo-history",
            "History Pack",
            Access::paid(rupees(149)),
            &[PDF_NOTES_B, "pdf-delhi", PDF_NOTES_A],
            100,
        ),
        combo(
            "combo-geo",
            "Geography Pack",
            Access::Free,
            &["pdf-monsoon", "pdf-missing", "pdf-ganga"],
            200,
        ),
    ];
    snapshot
}
