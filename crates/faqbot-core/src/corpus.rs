//! Corpus sources: the built-in WIT Darbhanga FAQ and JSON files.
use std::fs;
use std::path::Path;

use crate::config::CorpusSettings;
use crate::error::{Error, Result};
use crate::types::FaqPair;

const BUILTIN_FAQS: &[(&str, &str)] = &[
    ("What is the full name of WIT?", "WIT stands for Women's Institute of Technology, Darbhanga located in Bihar."),
    ("What is the campus address?", "WIT Darbhanga, Opp. Raj Dental College, NH-27, Darbhanga, Bihar."),
    ("What is the official website of WIT?", "The official website of WIT Darbhanga is https://www.wit.ac.in/."),
    ("How can I contact the WIT campus?", "You can reach WIT Darbhanga via phone at the main campus helpdesk or through their official website contact page."),
    ("What undergraduate programs are offered?", "WIT offers B.Tech programs in CSE, IT, ECE, and other engineering branches as per the academic calendar."),
    ("What is the eligibility for B.Tech admission?", "Students must have passed 12th with Physics, Chemistry, and Math with minimum qualifying marks as per university norms."),
    ("Does WIT accept JEE score?", "Yes, B.Tech admissions may consider JEE Main score based on the prevailing admission guidelines for the academic year."),
    ("How do I apply for admission?", "Visit the WIT website admissions section and fill the online application form or contact the admissions office."),
    ("What documents are required for admission?", "Common documents include 10th & 12th marksheets, transfer certificate, migration certificate, Aadhaar, photos, and entrance exam scorecards."),
    ("What are the hostel facilities available?", "WIT provides safe on-campus hostel facilities with mess, security, and essential amenities for students."),
    ("How can I apply for hostel accommodation?", "Students can apply through the hostel form available at the Student Services Office or email the hostel administration."),
    ("Are hostel rooms furnished?", "Yes, rooms are furnished with bed, table, chair, and basic utilities."),
    ("What are the hostel rules?", "Hostel rules include attendance, curfew timings, visitor restrictions, and maintaining discipline inside the campus."),
    ("What are the library hours?", "The library is generally open from 8:30 AM to 6:00 PM on weekdays and Saturdays."),
    ("Does the campus have WiFi?", "Yes, the campus provides high-speed WiFi for students and faculty."),
    ("How can students get WiFi access?", "Students must register their devices at the ICT department to receive login credentials."),
    ("What labs are available in WIT?", "WIT has well-equipped labs for Computer Science, Electronics, Applied Sciences, and Engineering departments."),
    ("How can I contact the placement cell?", "Students can email the placement office or visit the Training & Placement cell in the administration block."),
    ("Does the college provide placement support?", "Yes, the placement cell provides training, internships, industry sessions, and placement opportunities."),
    ("Which companies visit WIT for placements?", "Companies from IT, software, electronics, and consulting domains frequently visit for campus recruitment."),
    ("Is there a canteen in WIT?", "Yes, WIT has a clean and well-maintained canteen offering snacks, meals, and beverages."),
    ("What sports facilities are available?", "The campus provides indoor and outdoor sports facilities including badminton, volleyball, and athletics."),
    ("Does WIT organize cultural programs?", "Yes, WIT conducts annual cultural events, tech fests, seminars, and workshops."),
    ("How to get a bonafide certificate?", "Students can request a bonafide certificate through the administrative office by filling a simple form."),
    ("How to apply for leave?", "Students must submit a handwritten or online leave application to the department coordinator."),
    ("What is the dress code in WIT?", "Students are expected to follow formal or semi-formal attire guidelines as instructed by the college."),
    ("Is attendance compulsory?", "Yes, the minimum attendance requirement is usually 75% as per university regulations."),
    ("Where can I see the academic calendar?", "The academic calendar is available on the official WIT website under the academics section."),
    ("How to check exam schedules?", "Exam schedules are published on the notice board and on the official website prior to examinations."),
    ("How to access study materials?", "Students can access study materials through the library, department Google Classroom, or faculty-provided resources."),
    ("Does WIT have a grievance cell?", "Yes, WIT has an online and offline grievance redressal system for students."),
    ("How to report technical issues on campus?", "Students can contact the ICT desk for laptop, WiFi, or system-related issues."),
    ("Is transportation provided?", "Local transport options are available around campus; students may also use private transportation."),
    ("How to request a transcript?", "Students can apply for transcripts through the examination cell by submitting a formal request."),
    ("Does WIT provide internship support?", "Yes, the Training & Placement cell assists students in securing internships."),
    ("How to update personal details?", "Students can update details by submitting an application at the administrative office."),
    ("What is the fee payment procedure?", "Fees can be paid online through the WIT portal or offline at the accounts department."),
    ("Where can I see fee deadlines?", "Fee deadlines are notified via email, notice boards, and the official website."),
    ("Does the college have medical facilities?", "Yes, basic medical assistance is available on campus with first-aid support."),
    ("How to contact faculty members?", "Students can reach faculty through institutional email or meet during official office hours."),
];

/// The built-in dataset, in display order.
pub fn builtin_faqs() -> Vec<FaqPair> {
    BUILTIN_FAQS.iter().map(|(q, a)| FaqPair::new(*q, *a)).collect()
}

/// Loads the configured corpus: the JSON file when one is set, else the built-in list.
pub fn load(settings: &CorpusSettings) -> Result<Vec<FaqPair>> {
    match settings.file() {
        Some(path) => load_file(&path),
        None => {
            tracing::info!(entries = BUILTIN_FAQS.len(), "using built-in FAQ corpus");
            Ok(builtin_faqs())
        }
    }
}

/// Reads a JSON array of `{"question": .., "answer": ..}` objects.
pub fn load_file(path: &Path) -> Result<Vec<FaqPair>> {
    if !path.exists() {
        return Err(Error::NotFound(format!("corpus file {}", path.display())));
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| Error::Configuration(format!("failed to read {}: {}", path.display(), e)))?;
    let pairs: Vec<FaqPair> = serde_json::from_str(&raw)
        .map_err(|e| Error::Configuration(format!("failed to parse {}: {}", path.display(), e)))?;
    validate(&pairs)?;
    tracing::info!(entries = pairs.len(), path = %path.display(), "loaded FAQ corpus");
    Ok(pairs)
}

fn validate(pairs: &[FaqPair]) -> Result<()> {
    for (i, pair) in pairs.iter().enumerate() {
        if pair.question.trim().is_empty() {
            return Err(Error::Configuration(format!("corpus entry {i} has an empty question")));
        }
        if pair.answer.trim().is_empty() {
            return Err(Error::Configuration(format!("corpus entry {i} has an empty answer")));
        }
    }
    Ok(())
}
