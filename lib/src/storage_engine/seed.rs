// lib/src/storage_engine/seed.rs

//! Demo records loaded when `StoreConfig::seed_demo_data` is set. They carry
//! fixed timestamps so the dashboard looks the same on every start.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use models::{
    AIAnalysis, Address, AnalysisResults, AnalysisType, ClinicalData, ClinicalInput, Credentials,
    DoctorProfile, EmergencyContact, Exam, ExamCategory, Gender, Medication, MedicationForm, Patient,
    PatientStatus, RecordId, RiskLevel,
};

fn seed_time(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().unwrap_or_default()
}

fn seed_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn demo_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: RecordId::from(1),
            name: "Maria Silva Santos".into(),
            email: "maria.silva@email.com".into(),
            phone: "(11) 99999-9999".into(),
            cpf: "123.456.789-00".into(),
            birth_date: seed_date(1985, 3, 15),
            gender: Gender::Female,
            address: Address {
                street: "Rua das Flores".into(),
                number: "123".into(),
                complement: Some("Apto 45".into()),
                city: "São Paulo".into(),
                state: "SP".into(),
                zip_code: "01234-567".into(),
            },
            clinical_data: ClinicalData {
                blood_type: "A+".into(),
                allergies: strings(&["Penicilina"]),
                medications: strings(&["Vitamina D"]),
                medical_history: strings(&["Hipertensão"]),
                last_exam: Some(seed_date(2024, 1, 15)),
                observations: "Paciente com acompanhamento regular".into(),
            },
            emergency_contact: EmergencyContact {
                name: "João Silva".into(),
                relationship: "Esposo".into(),
                phone: "(11) 88888-8888".into(),
            },
            created_at: seed_time(2024, 1, 1, 0, 0),
            updated_at: seed_time(2024, 1, 15, 0, 0),
            status: PatientStatus::Active,
        },
        Patient {
            id: RecordId::from(2),
            name: "Ana Carolina Oliveira".into(),
            email: "ana.oliveira@email.com".into(),
            phone: "(11) 77777-7777".into(),
            cpf: "987.654.321-00".into(),
            birth_date: seed_date(1992, 7, 22),
            gender: Gender::Female,
            address: Address {
                street: "Avenida Principal".into(),
                number: "456".into(),
                complement: None,
                city: "São Paulo".into(),
                state: "SP".into(),
                zip_code: "02345-678".into(),
            },
            clinical_data: ClinicalData {
                blood_type: "O+".into(),
                allergies: vec![],
                medications: vec![],
                medical_history: vec![],
                last_exam: Some(seed_date(2024, 2, 10)),
                observations: "Paciente saudável".into(),
            },
            emergency_contact: EmergencyContact {
                name: "Pedro Oliveira".into(),
                relationship: "Irmão".into(),
                phone: "(11) 66666-6666".into(),
            },
            created_at: seed_time(2024, 2, 1, 0, 0),
            updated_at: seed_time(2024, 2, 10, 0, 0),
            status: PatientStatus::Active,
        },
    ]
}

pub fn demo_analyses() -> Vec<AIAnalysis> {
    vec![AIAnalysis {
        id: RecordId::from(1),
        patient_id: RecordId::from(1),
        analysis_type: AnalysisType::CervicalCancerDetection,
        image_files: strings(&["exam1.jpg", "exam2.jpg"]),
        clinical_data: ClinicalInput {
            age: 39,
            symptoms: strings(&["Sangramento irregular"]),
            risk_factors: strings(&["HPV positivo"]),
            previous_exams: strings(&["Papanicolaou 2023"]),
        },
        results: AnalysisResults {
            risk_level: RiskLevel::Medium,
            confidence: 0.85,
            findings: strings(&["Células atípicas detectadas", "Possível lesão pré-cancerosa"]),
            recommendations: strings(&["Colposcopia", "Biópsia dirigida", "Acompanhamento em 3 meses"]),
            requires_follow_up: true,
        },
        analyzed_at: seed_time(2024, 3, 1, 10, 30),
        analyzed_by: "IA Medase v2.1".into(),
    }]
}

pub fn demo_exams() -> Vec<Exam> {
    let at = seed_time(2024, 1, 1, 0, 0);
    vec![
        Exam {
            id: RecordId::from(1),
            name: "Hemograma Completo".into(),
            description: "Análise completa dos componentes do sangue".into(),
            category: ExamCategory::Laboratorial,
            price: 45.0,
            duration_minutes: 15,
            preparation: Some("Jejum de 8 horas".into()),
            observations: Some("Resultado em 24 horas".into()),
            active: true,
            created_at: at,
            updated_at: at,
        },
        Exam {
            id: RecordId::from(2),
            name: "Ultrassom Pélvico".into(),
            description: "Exame de imagem do sistema reprodutor feminino".into(),
            category: ExamCategory::Imagem,
            price: 120.0,
            duration_minutes: 30,
            preparation: Some("Bexiga cheia".into()),
            observations: Some("Agendamento necessário".into()),
            active: true,
            created_at: at,
            updated_at: at,
        },
    ]
}

pub fn demo_medications() -> Vec<Medication> {
    let at = seed_time(2024, 1, 1, 0, 0);
    vec![
        Medication {
            id: RecordId::from(1),
            name: "Paracetamol 500mg".into(),
            active_ingredient: "Paracetamol".into(),
            dosage: "500mg".into(),
            form: MedicationForm::Comprimido,
            manufacturer: "EMS".into(),
            description: Some("Analgésico e antitérmico".into()),
            contraindications: Some("Hipersensibilidade ao paracetamol".into()),
            side_effects: Some("Raros: náuseas, vômitos".into()),
            active: true,
            created_at: at,
            updated_at: at,
        },
        Medication {
            id: RecordId::from(2),
            name: "Ibuprofeno 600mg".into(),
            active_ingredient: "Ibuprofeno".into(),
            dosage: "600mg".into(),
            form: MedicationForm::Comprimido,
            manufacturer: "Medley".into(),
            description: Some("Anti-inflamatório não esteroidal".into()),
            contraindications: Some("Úlcera péptica, insuficiência renal".into()),
            side_effects: Some("Dor abdominal, náuseas, tonturas".into()),
            active: true,
            created_at: at,
            updated_at: at,
        },
    ]
}

pub fn demo_profile() -> DoctorProfile {
    let at = seed_time(2024, 1, 1, 0, 0);
    DoctorProfile {
        id: RecordId::from(1),
        name: "Dr. Admin".into(),
        email: "admin@medase.com".into(),
        license: "CRM-SP 123456".into(),
        specialty: "Ginecologia e Obstetrícia".into(),
        institution: "Hospital Medase".into(),
        phone: "(11) 99999-9999".into(),
        address: Address {
            street: "Rua dos Médicos".into(),
            number: "123".into(),
            complement: Some("Sala 45".into()),
            city: "São Paulo".into(),
            state: "SP".into(),
            zip_code: "01234-567".into(),
        },
        credentials: Credentials {
            university: "Universidade de São Paulo".into(),
            graduation_year: 2010,
            residency: Some("Ginecologia e Obstetrícia - Hospital das Clínicas".into()),
            specializations: strings(&["Ginecologia", "Obstetrícia", "Ultrassonografia"]),
        },
        created_at: at,
        updated_at: at,
    }
}

/// The profile used when demo data is off: blank except for its id.
pub fn blank_profile(at: DateTime<Utc>) -> DoctorProfile {
    DoctorProfile {
        id: RecordId::from(1),
        name: String::new(),
        email: String::new(),
        license: String::new(),
        specialty: String::new(),
        institution: String::new(),
        phone: String::new(),
        address: Address::default(),
        credentials: Credentials::default(),
        created_at: at,
        updated_at: at,
    }
}
