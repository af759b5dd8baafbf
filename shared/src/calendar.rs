//! The Pranata Mangsa calendar table
//!
//! Twelve fixed periods, stored in cycle order: index `i` holds the period
//! whose id is `i + 1`. The table is static data and never changes at runtime.

use thiserror::Error;

use crate::models::{Crop, Indicator, MonthDay, Period, SeasonKind, SeasonWindow};

/// Number of periods in one annual cycle
pub const PERIOD_COUNT: usize = 12;

/// Errors found when checking a period table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("expected {expected} periods, found {found}")]
    WrongCount { expected: usize, found: usize },

    #[error("period at index {index} has id {id}, expected {expected}")]
    OutOfOrder { index: usize, id: u8, expected: u8 },

    #[error("period {id} has an invalid window bound {bound}")]
    InvalidBound { id: u8, bound: MonthDay },

    #[error("no period covers {day}")]
    Gap { day: MonthDay },

    #[error("{day} is covered by both period {first} and period {second}")]
    Overlap { day: MonthDay, first: u8, second: u8 },
}

const fn md(month: u32, day: u32) -> MonthDay {
    MonthDay::new(month, day)
}

static PERIODS: [Period; PERIOD_COUNT] = [
    Period {
        id: 1,
        numeral: "I",
        name: "Kasa",
        display_name: "Mangsa Kasa",
        window: SeasonWindow::new(md(6, 22), md(8, 1)),
        description: "Daun-daun mulai berguguran. Tanah mulai retak-retak. Musim kemarau dimulai.",
        indicators: &[
            Indicator { name: "Cuaca", description: "Kering, suhu mulai naik" },
            Indicator { name: "Tanah", description: "Mulai retak-retak" },
            Indicator { name: "Tanaman", description: "Daun berguguran" },
        ],
        suitable_crops: &[
            Crop { name: "Palawija", description: "Jagung, kedelai, kacang tanah" },
            Crop { name: "Sayuran", description: "Terong, cabai, tomat" },
        ],
        farming_status: "Musim Kemarau",
        main_activity: "Persiapan lahan kering",
        tips: &[
            "Siapkan irigasi cadangan",
            "Pilih varietas tahan kekeringan",
            "Gunakan mulsa untuk mengurangi penguapan",
        ],
    },
    Period {
        id: 2,
        numeral: "II",
        name: "Karo",
        display_name: "Mangsa Karo",
        window: SeasonWindow::new(md(8, 2), md(8, 24)),
        description: "Musim kemarau puncak. Tanah sangat kering. Angin kencang bertiup.",
        indicators: &[
            Indicator { name: "Cuaca", description: "Sangat kering dan panas" },
            Indicator { name: "Tanah", description: "Retak-retak dalam" },
            Indicator { name: "Angin", description: "Kencang dan kering" },
        ],
        suitable_crops: &[
            Crop { name: "Tanaman Tahan Kering", description: "Singkong, ubi jalar" },
            Crop { name: "Sayuran Hardy", description: "Kangkung, bayam" },
        ],
        farming_status: "Kemarau Puncak",
        main_activity: "Pemeliharaan tanaman tahan kering",
        tips: &[
            "Penyiraman intensif di pagi dan sore",
            "Gunakan naungan untuk tanaman sensitif",
            "Simpan air hujan untuk cadangan",
        ],
    },
    Period {
        id: 3,
        numeral: "III",
        name: "Katelu",
        display_name: "Mangsa Katelu",
        window: SeasonWindow::new(md(8, 25), md(9, 17)),
        description: "Akhir musim kemarau. Mulai ada tanda-tanda hujan. Udara mulai lembab.",
        indicators: &[
            Indicator { name: "Cuaca", description: "Mulai berawan" },
            Indicator { name: "Udara", description: "Kelembaban meningkat" },
            Indicator { name: "Angin", description: "Mulai berubah arah" },
        ],
        suitable_crops: &[
            Crop { name: "Persiapan Padi", description: "Pembibitan padi" },
            Crop { name: "Sayuran Musim Hujan", description: "Persiapan lahan sayuran" },
        ],
        farming_status: "Transisi ke Musim Hujan",
        main_activity: "Persiapan musim tanam",
        tips: &[
            "Siapkan bibit untuk musim hujan",
            "Perbaiki saluran irigasi",
            "Bersihkan lahan dari gulma",
        ],
    },
    Period {
        id: 4,
        numeral: "IV",
        name: "Kapat",
        display_name: "Mangsa Kapat",
        window: SeasonWindow::new(md(9, 18), md(10, 12)),
        description: "Awal musim hujan. Hujan mulai turun tidak teratur. Tanah mulai basah.",
        indicators: &[
            Indicator { name: "Cuaca", description: "Hujan tidak teratur" },
            Indicator { name: "Tanah", description: "Mulai lembab" },
            Indicator { name: "Tanaman", description: "Mulai tumbuh tunas baru" },
        ],
        suitable_crops: &[
            Crop { name: "Padi", description: "Mulai tanam padi" },
            Crop { name: "Jagung", description: "Tanam jagung musim hujan" },
        ],
        farming_status: "Awal Musim Hujan",
        main_activity: "Mulai penanaman",
        tips: &[
            "Tanam segera setelah hujan pertama",
            "Pastikan drainase baik",
            "Pilih varietas sesuai curah hujan",
        ],
    },
    Period {
        id: 5,
        numeral: "V",
        name: "Kalima",
        display_name: "Mangsa Kalima",
        window: SeasonWindow::new(md(10, 13), md(11, 8)),
        description: "Musim hujan mulai teratur. Curah hujan meningkat. Tanaman tumbuh subur.",
        indicators: &[
            Indicator { name: "Cuaca", description: "Hujan teratur" },
            Indicator { name: "Tanah", description: "Basah dan subur" },
            Indicator { name: "Tanaman", description: "Pertumbuhan pesat" },
        ],
        suitable_crops: &[
            Crop { name: "Padi", description: "Masa pertumbuhan vegetatif" },
            Crop { name: "Sayuran Hijau", description: "Sawi, selada, kangkung" },
        ],
        farming_status: "Musim Hujan Aktif",
        main_activity: "Pemeliharaan tanaman",
        tips: &[
            "Lakukan penyiangan rutin",
            "Berikan pupuk sesuai kebutuhan",
            "Kontrol hama dan penyakit",
        ],
    },
    Period {
        id: 6,
        numeral: "VI",
        name: "Kanem",
        display_name: "Mangsa Kanem",
        window: SeasonWindow::new(md(11, 9), md(12, 21)),
        description: "Puncak musim hujan. Curah hujan tinggi. Risiko banjir meningkat.",
        indicators: &[
            Indicator { name: "Cuaca", description: "Hujan deras dan sering" },
            Indicator { name: "Air", description: "Genangan di mana-mana" },
            Indicator { name: "Tanaman", description: "Risiko busuk akar" },
        ],
        suitable_crops: &[
            Crop { name: "Padi Sawah", description: "Cocok untuk padi sawah" },
            Crop { name: "Ikan", description: "Budidaya ikan di sawah" },
        ],
        farming_status: "Puncak Musim Hujan",
        main_activity: "Pengelolaan air",
        tips: &[
            "Pastikan drainase lancar",
            "Waspada serangan hama",
            "Lindungi tanaman dari hujan berlebih",
        ],
    },
    Period {
        id: 7,
        numeral: "VII",
        name: "Kapitu",
        display_name: "Mangsa Kapitu",
        window: SeasonWindow::new(md(12, 22), md(2, 2)),
        description: "Hujan deras. Sungai-sungai banjir. Banyak petir dan angin kencang.",
        indicators: &[
            Indicator { name: "Cuaca", description: "Hujan lebat, petir" },
            Indicator { name: "Sungai", description: "Meluap dan banjir" },
            Indicator { name: "Angin", description: "Kencang dan berbahaya" },
        ],
        suitable_crops: &[
            Crop { name: "Tanaman Air", description: "Eceng gondok, teratai" },
            Crop { name: "Padi Tahan Banjir", description: "Varietas padi rawa" },
        ],
        farming_status: "Musim Hujan Ekstrem",
        main_activity: "Proteksi tanaman",
        tips: &[
            "Buat pematang tinggi",
            "Siapkan pompa air",
            "Hindari aktivitas di lahan terbuka",
        ],
    },
    Period {
        id: 8,
        numeral: "VIII",
        name: "Kawolu",
        display_name: "Mangsa Kawolu",
        // runs to the end of February, leap day included
        window: SeasonWindow::new(md(2, 3), md(2, 29)),
        description: "Hujan mulai berkurang. Cuaca mulai cerah. Tanaman mulai berbunga.",
        indicators: &[
            Indicator { name: "Cuaca", description: "Hujan berkurang" },
            Indicator { name: "Matahari", description: "Mulai sering muncul" },
            Indicator { name: "Tanaman", description: "Fase berbunga" },
        ],
        suitable_crops: &[
            Crop { name: "Padi", description: "Masa pembungaan padi" },
            Crop { name: "Buah-buahan", description: "Mangga, rambutan mulai berbuah" },
        ],
        farming_status: "Transisi Hujan-Kemarau",
        main_activity: "Perawatan pembungaan",
        tips: &[
            "Kurangi pemberian air",
            "Berikan pupuk kalium",
            "Lindungi bunga dari hujan",
        ],
    },
    Period {
        id: 9,
        numeral: "IX",
        name: "Kasanga",
        display_name: "Mangsa Kasanga",
        window: SeasonWindow::new(md(3, 1), md(3, 25)),
        description: "Akhir musim hujan. Cuaca cerah. Tanaman mulai matang.",
        indicators: &[
            Indicator { name: "Cuaca", description: "Cerah dan hangat" },
            Indicator { name: "Tanah", description: "Mulai mengering" },
            Indicator { name: "Tanaman", description: "Matang dan siap panen" },
        ],
        suitable_crops: &[
            Crop { name: "Padi", description: "Masa pematangan bulir" },
            Crop { name: "Palawija", description: "Jagung, kedelai siap panen" },
        ],
        farming_status: "Masa Pematangan",
        main_activity: "Persiapan panen",
        tips: &[
            "Kurangi pengairan",
            "Pantau tingkat kematangan",
            "Siapkan alat panen",
        ],
    },
    Period {
        id: 10,
        numeral: "X",
        name: "Kasadasa",
        display_name: "Mangsa Kasadasa",
        window: SeasonWindow::new(md(3, 26), md(4, 18)),
        description: "Musim panen tiba. Cuaca kering dan cerah. Angin bertiup dari timur.",
        indicators: &[
            Indicator { name: "Cuaca", description: "Kering dan cerah" },
            Indicator { name: "Angin", description: "Bertiup dari timur" },
            Indicator { name: "Tanaman", description: "Siap dipanen" },
        ],
        suitable_crops: &[
            Crop { name: "Padi", description: "Panen raya padi" },
            Crop { name: "Jagung", description: "Panen jagung" },
        ],
        farming_status: "Musim Panen",
        main_activity: "Panen dan pengeringan",
        tips: &[
            "Panen di pagi hari",
            "Keringkan hasil panen",
            "Simpan dengan baik",
        ],
    },
    Period {
        id: 11,
        numeral: "XI",
        name: "Dhesta",
        display_name: "Mangsa Dhesta",
        window: SeasonWindow::new(md(4, 19), md(5, 11)),
        description: "Panen selesai. Lahan kosong. Persiapan untuk siklus berikutnya.",
        indicators: &[
            Indicator { name: "Lahan", description: "Kosong setelah panen" },
            Indicator { name: "Cuaca", description: "Kering dan stabil" },
            Indicator { name: "Petani", description: "Istirahat dan persiapan" },
        ],
        suitable_crops: &[
            Crop { name: "Tanaman Penutup", description: "Legum penutup tanah" },
            Crop { name: "Sayuran Cepat", description: "Bayam, kangkung" },
        ],
        farming_status: "Masa Istirahat Lahan",
        main_activity: "Persiapan lahan baru",
        tips: &[
            "Biarkan lahan beristirahat",
            "Tanam tanaman penutup",
            "Perbaiki infrastruktur pertanian",
        ],
    },
    Period {
        id: 12,
        numeral: "XII",
        name: "Sadha",
        display_name: "Mangsa Sadha",
        window: SeasonWindow::new(md(5, 12), md(6, 21)),
        description: "Musim kemarau mulai. Tanah mulai mengering. Angin bertiup dari timur ke barat.",
        indicators: &[
            Indicator { name: "Cuaca", description: "Cerah, angin timur" },
            Indicator { name: "Tanah", description: "Mulai mengering" },
            Indicator { name: "Tanaman", description: "Padi menguning" },
        ],
        suitable_crops: &[
            Crop { name: "Padi", description: "Masa panen raya" },
            Crop { name: "Palawija", description: "Persiapan tanam palawija" },
        ],
        farming_status: "Musim Panen",
        main_activity: "Panen padi dan persiapan palawija",
        tips: &[
            "Lakukan panen di pagi hari",
            "Keringkan gabah dengan baik",
            "Siapkan lahan untuk palawija",
        ],
    },
];

/// All twelve periods in cycle order
pub fn all() -> &'static [Period; PERIOD_COUNT] {
    &PERIODS
}

/// Look up a period by its ordinal id (1-12)
pub fn get_by_id(id: u8) -> Option<&'static Period> {
    index_of(id).map(|index| &PERIODS[index])
}

/// Look up a period by its Roman numeral ("VII")
pub fn get_by_numeral(numeral: &str) -> Option<&'static Period> {
    let numeral = numeral.trim();
    PERIODS
        .iter()
        .find(|p| p.numeral.eq_ignore_ascii_case(numeral))
}

/// Table index for an ordinal id
pub fn index_of(id: u8) -> Option<usize> {
    match id {
        1..=12 => Some(id as usize - 1),
        _ => None,
    }
}

/// The period after `period`, wrapping from XII back to I
pub fn next(period: &Period) -> &'static Period {
    let index = index_of(period.id).unwrap_or(PERIOD_COUNT - 1);
    &PERIODS[(index + 1) % PERIOD_COUNT]
}

/// The period before `period`, wrapping from I back to XII
pub fn previous(period: &Period) -> &'static Period {
    let index = index_of(period.id).unwrap_or(0);
    &PERIODS[(index + PERIOD_COUNT - 1) % PERIOD_COUNT]
}

/// Periods whose description matches the requested season character.
/// A period can appear under both rainy and dry.
pub fn by_season(kind: SeasonKind) -> Vec<&'static Period> {
    PERIODS.iter().filter(|p| p.has_season(kind)).collect()
}

/// Check the built-in table
pub fn validate() -> Result<(), CalendarError> {
    validate_periods(&PERIODS)
}

/// Check that a table has twelve ordered periods whose windows cover every
/// day of a leap year exactly once.
pub fn validate_periods(periods: &[Period]) -> Result<(), CalendarError> {
    if periods.len() != PERIOD_COUNT {
        return Err(CalendarError::WrongCount {
            expected: PERIOD_COUNT,
            found: periods.len(),
        });
    }

    for (index, period) in periods.iter().enumerate() {
        let expected = index as u8 + 1;
        if period.id != expected {
            return Err(CalendarError::OutOfOrder {
                index,
                id: period.id,
                expected,
            });
        }
        for bound in [period.window.start, period.window.end] {
            if !bound.is_valid() {
                return Err(CalendarError::InvalidBound {
                    id: period.id,
                    bound,
                });
            }
        }
    }

    for day in MonthDay::all_days() {
        let mut covering = periods.iter().filter(|p| p.window.contains(day));
        match (covering.next(), covering.next()) {
            (None, _) => return Err(CalendarError::Gap { day }),
            (Some(first), Some(second)) => {
                return Err(CalendarError::Overlap {
                    day,
                    first: first.id,
                    second: second.id,
                })
            }
            (Some(_), None) => {}
        }
    }

    Ok(())
}
