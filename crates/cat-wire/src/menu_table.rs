//! Static menu descriptor table for the FT-991A
//!
//! One entry per menu code the radio exposes over `EX`. Descriptions and
//! range texts label snapshot output for a human reader; nothing in the
//! protocol path consults this table.

/// Description of one menu item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuDescriptor {
    /// Three-digit menu code
    pub code: &'static str,
    /// Item name as the front panel shows it
    pub description: &'static str,
    /// Accepted-range text, informational only
    pub range: &'static str,
    /// Unit text, often empty
    pub unit: &'static str,
}

impl MenuDescriptor {
    pub const fn new(
        code: &'static str,
        description: &'static str,
        range: &'static str,
        unit: &'static str,
    ) -> Self {
        Self {
            code,
            description,
            range,
            unit,
        }
    }
}

/// Look up a menu descriptor by its three-digit code
pub fn describe(code: &str) -> Option<&'static MenuDescriptor> {
    // Codes are dense and sorted, so the index is derivable, but a scan
    // keeps the table free to grow holes for other firmware revisions.
    MENU_ITEMS.iter().find(|d| d.code == code)
}

/// Every menu code in snapshot order
pub const MENU_ITEMS: &[MenuDescriptor] = &[
    MenuDescriptor::new("001", "AGC FAST DELAY", "20 - 4000", "msec"),
    MenuDescriptor::new("002", "AGC MID DELAY", "20 - 4000", "msec"),
    MenuDescriptor::new("003", "AGC SLOW DELAY", "20 - 4000", "msec"),
    MenuDescriptor::new("004", "HOME FUNCTION", "0:SCOPE, 1:FUNCTION", ""),
    MenuDescriptor::new("005", "MY CALL INDICATOR", "0 - 5", "sec"),
    MenuDescriptor::new(
        "006",
        "DISPLAY COLOR",
        "0:BLUE, 1:GRAY, 2:GREEN, 3:ORANGE, 4:PURPLE, 5:RED, 6:SKY BLUE",
        "",
    ),
    MenuDescriptor::new("007", "DIMMER LED", "0:1, 1:2", ""),
    MenuDescriptor::new("008", "DIMMER TFT", "0-15", ""),
    MenuDescriptor::new(
        "009",
        "DISPLAY BAR MTR PEAK HOLD",
        "0:0s, 1:0.5s, 2:1s, 3:2s",
        "",
    ),
    MenuDescriptor::new("010", "DVS RX OUT LEVEL", "0-100", ""),
    MenuDescriptor::new("011", "DVS TX OUT LEVEL", "0-100", ""),
    MenuDescriptor::new(
        "012",
        "KEYER TYPE",
        "0:OFF, 1:BUG, 2:ELEKEY-A, 3:ELEKEY-B, 4:ELEKEY-Y, 5:ACS",
        "",
    ),
    MenuDescriptor::new("013", "KEYER DOT DASH", "0:NORMAL, 1:REVERSE", ""),
    MenuDescriptor::new("014", "KEYER CW WEIGHT", "2.5 - 4.5", ""),
    MenuDescriptor::new("015", "KEYER BEACON TIME", "0:OFF, 1:1 - 240", "sec"),
    MenuDescriptor::new(
        "016",
        "KEYER NUMBER STYLE",
        "0:1290, 1:AUNO, 2:AUNT, 3:A2NO, 4:A2NT, 5:12NO, 6:12NT",
        "",
    ),
    MenuDescriptor::new("017", "KEYER CONTEST NUMBER", "0-9999", ""),
    MenuDescriptor::new("018", "KEYER CW MEMORY 1", "0:TEXT, 1:MESSAGE", ""),
    MenuDescriptor::new("019", "KEYER CW MEMORY 2", "0:TEXT, 1:MESSAGE", ""),
    MenuDescriptor::new("020", "KEYER CW MEMORY 3", "0:TEXT, 1:MESSAGE", ""),
    MenuDescriptor::new("021", "KEYER CW MEMORY 4", "0:TEXT, 1:MESSAGE", ""),
    MenuDescriptor::new("022", "KEYER CW MEMORY 5", "0:TEXT, 1:MESSAGE", ""),
    MenuDescriptor::new("023", "NB WIDTH", "0:1ms, 1:3ms, 2:10ms", ""),
    MenuDescriptor::new("024", "NB REJECTION", "0:10 dB, 1:30 dB, 2:50dB", ""),
    MenuDescriptor::new("025", "NB LEVEL", "0-10", ""),
    MenuDescriptor::new("026", "BEEP LEVEL", "0-100", ""),
    MenuDescriptor::new("027", "Please set this at the radio", "TIMEZONE", ""),
    MenuDescriptor::new("028", "GPS/232C SELECT", "0:GPS1, 1:GPS2, 2:RS232C", ""),
    MenuDescriptor::new(
        "029",
        "232C RATE",
        "0:4800bps, 1:9600bps, 2:19200bps, 3:38400bps",
        "",
    ),
    MenuDescriptor::new("030", "232C TOT", "0:10ms, 1:100ms, 2:1000ms, 3:3000", ""),
    MenuDescriptor::new(
        "031",
        "CAT RATE",
        "0:4800bps, 1:9600bps, 2:19200bps, 3:38400bps",
        "",
    ),
    MenuDescriptor::new(
        "032",
        "CAT TIMEOUT",
        "0:10ms, 1:100ms, 2:1000ms, 3:3000ms",
        "",
    ),
    MenuDescriptor::new("033", "CAT RTS", "0:DISABLE, 1:ENABLE", ""),
    MenuDescriptor::new("034", "MEM GROUP", "0:DISABLE, 1:ENABLE", ""),
    MenuDescriptor::new("035", "QUICK SPLIT FREQ", "-20 to +20 kHz", ""),
    MenuDescriptor::new("036", "TX TIMEOUT TIMER", "0-30min", ""),
    MenuDescriptor::new("037", "MIC SCAN", "0:DISABLE, 1:ENABLE", ""),
    MenuDescriptor::new("038", "MIC SCAN RESUME", "0:PAUSE, 1:TIME", ""),
    MenuDescriptor::new("039", "REF FREQUENCY ADJUST", "-25 to +25 kHz", ""),
    MenuDescriptor::new("040", "CLAR MODE SELECT", "0:RX, 1:TX, 2:TRX", ""),
    MenuDescriptor::new("041", "Mode:AM LCUT Freq", "0:OFF, 1:100Hz - 19:1000Hz", ""),
    MenuDescriptor::new("042", "Mode:AM LCUT Slope", "0:6dB/oct, 1:18dB/oct", ""),
    MenuDescriptor::new("043", "Mode:AM HCUT Freq", "0:OFF, 1:700Hz - 67:4000Hz", ""),
    MenuDescriptor::new("044", "Mode:AM HCUT Slope", "0:6dB/oct, 1:18dB/oct", ""),
    MenuDescriptor::new("045", "Mode:AM MIC SEL", "0:MIC, 1:REAR", ""),
    MenuDescriptor::new("046", "Mode:AM OUT LEVEL", "0-100", ""),
    MenuDescriptor::new("047", "Mode:AM PTT SELECT", "0:DAKY, 1:RTS, 2:DTR", ""),
    MenuDescriptor::new("048", "Mode:AM PORT SELECT", "0:DATA, 1:USB", ""),
    MenuDescriptor::new("049", "Mode:AM DATA GAIN", "0-100", ""),
    MenuDescriptor::new("050", "Mode:CW LCUT FREQ", "0:OFF, 1:100Hz - 19:1000Hz", ""),
    MenuDescriptor::new("051", "Mode:CW LCUT SLOPE", "0:6dB/oct, 1:18dB/oct", ""),
    MenuDescriptor::new("052", "Mode:CW HCUT FREQ", "0:OFF, 1:700Hz - 67:4000Hz", ""),
    MenuDescriptor::new("053", "Mode:CW HCUT SLOPE", "0:6dB/oct, 1:18dB/oct", ""),
    MenuDescriptor::new("054", "Mode:CW OUT LEVEL", "0-100", ""),
    MenuDescriptor::new("055", "Mode:CW CW AUTO MODE", "0:OFF, 1:50MHz, 2:ON", ""),
    MenuDescriptor::new("056", "Mode:CW CW BK-IN", "0:SEMI, 1:FULL", ""),
    MenuDescriptor::new("057", "MODE:CW CW BK-IN DELAY", "30 - 3000", "msec"),
    MenuDescriptor::new(
        "058",
        "Mode:CW CW WAVE SHAPE",
        "0:1ms, 1:2ms, 2:4ms, 3:6ms",
        "",
    ),
    MenuDescriptor::new("059", "Mode:CW CW FREQ DISPLAY", "0:DIRECT, 1:OFFSET", ""),
    MenuDescriptor::new("060", "Mode:CW PC KEYING", "0:OFF, 1:DAKY, 2:RTS, 3:DTR", ""),
    MenuDescriptor::new("061", "Mode:CW QSK", "0:15ms, 1:20ms, 2:25ms, 3:30ms", ""),
    MenuDescriptor::new("062", "Mode:DATA DATA MODE", "0:PSK, 1:OTHER", ""),
    MenuDescriptor::new("063", "PSK TONE", "0:1000, 1:1500, 2:2000", ""),
    MenuDescriptor::new("064", "Mode:DATA OTHER DISP SSB", "-3000 to +3000 kHz", ""),
    MenuDescriptor::new("065", "Mode:DATA OTHER SHIFT SSB", "-3000 to +3000 kHz", ""),
    MenuDescriptor::new(
        "066",
        "Mode:DATA DATA LCUT FREQ",
        "0:OFF, 1:100Hz - 19:1000Hz",
        "",
    ),
    MenuDescriptor::new(
        "067",
        "Mode:DATA DATA LCUT SLOPE",
        "0:6dB/oct, 1:18dB/oct",
        "",
    ),
    MenuDescriptor::new(
        "068",
        "Mode:DATA DATA HCUT FREQ",
        "0:OFF, 1:700Hz - 67:4000Hz",
        "",
    ),
    MenuDescriptor::new(
        "069",
        "Mode:DATA DATA HCUT SLOPE",
        "0:6dB/oct, 1:18dB/oct",
        "",
    ),
    MenuDescriptor::new("070", "Mode:DATA DATA IN SELECT", "0:MIC, 1:REAR", ""),
    MenuDescriptor::new("071", "Mode:DATA PTT SELECT", "0:DAKY, 1:RTS, 2:DTR", ""),
    MenuDescriptor::new("072", "Mode:DATA PORT SELECT", "0:DATA, 1:USB", ""),
    MenuDescriptor::new("073", "Mode:DATA DATA OUT LEVEL", "0-100", ""),
    MenuDescriptor::new("074", "Mode:FM FM MIC SEL", "0:MIC, 1:REAR", ""),
    MenuDescriptor::new("075", "FM OUT LEVEL", "0-100", ""),
    MenuDescriptor::new("076", "FM PKT PTT SELECT", "0:DAKY, 1:RTS, 2:DTR", ""),
    MenuDescriptor::new("077", "FM PORT SELECT", "0:DATA, 1:USB", ""),
    MenuDescriptor::new("078", "FM PKT TX GAIN", "0-100", ""),
    MenuDescriptor::new("079", "FM PKT MODE", "0:1200, 1:9600", ""),
    MenuDescriptor::new("080", "Mode:FM RPT SHIFT(28MHz)", "0-1000", ""),
    MenuDescriptor::new("081", "Mode:FM RPT SHIFT(50MHz)", "0-4000", ""),
    MenuDescriptor::new("082", "Mode:FM RPT SHIFT(144MHz)", "0-4000", ""),
    MenuDescriptor::new("083", "Mode:FM RPT SHIFT(430MHz)", "0-10000", ""),
    MenuDescriptor::new("084", "ARS 144MHz", "0:OFF, 1:ON", ""),
    MenuDescriptor::new("085", "ARS 430MHz", "0:OFF, 1:ON", ""),
    MenuDescriptor::new(
        "086",
        "DCS POLARITY",
        "0:Tn-Rn, 1:Tn-Riv, 2:Tiv-Rn, 3:Tiv-Riv",
        "",
    ),
    MenuDescriptor::new(
        "087",
        "Please set this at the radio",
        "0:6dB/oct, 1:18dB/oct",
        "",
    ),
    MenuDescriptor::new("088", "GM DISPLAY", "0:DISTANCE, 1:STRENGTH", ""),
    MenuDescriptor::new("089", "DISTANCE", "0:KM, 1:MILE", ""),
    MenuDescriptor::new(
        "090",
        "AMS TX MODE",
        "0:AUTO, 1:MANUAL, 2:DN, 3:VW, 4:ANALOG",
        "",
    ),
    MenuDescriptor::new("091", "STANDBY BEEP", "0:OFF, 1:ON", ""),
    MenuDescriptor::new(
        "092",
        "Mode:RTTY LCUT FREQ",
        "0:OFF, 1:100Hz - 19:1000 50Hz STEPS",
        "",
    ),
    MenuDescriptor::new("093", "Mode:RTTY LCUT SLOPE", "0:6dB/oct, 1:18dB/oct", ""),
    MenuDescriptor::new(
        "094",
        "Mode:RTTY HCUT FREQ",
        "0:OFF, 1:700Hz - 67:4000Hz",
        "",
    ),
    MenuDescriptor::new("095", "Mode:RTTY HCUT SLOPE", "0:6dB/oct, 1:18dB/oct", ""),
    MenuDescriptor::new("096", "RTTY SHIFT PORT", "0:SHIFT, 1:DTR, 2:RTS", ""),
    MenuDescriptor::new("097", "Mode:RTTY POLARITY-R", "0:NOR, 1:REV", ""),
    MenuDescriptor::new("098", "Mode:RTTY POLARITY-T", "0:NOR, 1:REV", ""),
    MenuDescriptor::new("099", "Mode:RTTY OUT LEVEL", "0-100", ""),
    MenuDescriptor::new(
        "100",
        "Mode:RTTY RTTY SHIFT",
        "0:170, 1:200, 2:425, 3:850",
        "",
    ),
    MenuDescriptor::new("101", "Mode:RTTY MARK FREQ", "0:1275Hz, 1:2125Hz", ""),
    MenuDescriptor::new(
        "102",
        "Mode:SSB LCUT FREQ",
        "0:OFF, 1:100Hz - 19:1000Hz (50Hz steps)",
        "",
    ),
    MenuDescriptor::new("103", "Mode:SSB LCUT SLOPE", "0:6dB/oct, 1:18dB/oct", ""),
    MenuDescriptor::new(
        "104",
        "Mode:SSB HCUT FREQ",
        "0:OFF, 1:700Hz - 67:4000Hz (50Hz steps)",
        "",
    ),
    MenuDescriptor::new("105", "Mode:SSB HCUT SLOPE", "0:6dB/oct, 1:18dB/oct", ""),
    MenuDescriptor::new("106", "Mode:SSB MIC SELECT", "0:MIC, 1:REAR", ""),
    MenuDescriptor::new("107", "Mode:SSB OUT LEVEL", "0-100", ""),
    MenuDescriptor::new("108", "Mode:SSB PTT SELECT", "0:DAKY, 1:RTS, 2:DTR", ""),
    MenuDescriptor::new("109", "Mode:SSB PORT SELECT", "0:DATA, 1:USB", ""),
    MenuDescriptor::new(
        "110",
        "Mode:SSB TX BPF",
        "0:50-3000, 1:100-2900, 2:200-2800, 3:300-2700, 4:400-2600",
        "",
    ),
    MenuDescriptor::new("111", "APF WIDTH", "0:NARROW, 1:MEDIUM, 2:WIDE", ""),
    MenuDescriptor::new("112", "CONTOUR LEVEL", "-40 to +20", ""),
    MenuDescriptor::new("113", "CONTOUR WIDTH", "1-11", ""),
    MenuDescriptor::new("114", "IF NOTCH WIDTH", "0:NARROW, 1:WIDE", ""),
    MenuDescriptor::new("115", "SCOPE DISPLAY MODE", "0:SPECTRUM, 1:WATERFALL", ""),
    MenuDescriptor::new(
        "116",
        "SCOPE SPAN FREQ",
        "3:50kHz, 4:100kHz, 5:200kHz, 6:500kHz, 7:1000kHz",
        "",
    ),
    MenuDescriptor::new(
        "117",
        "SPECTRUM COLOR",
        "0:BLUE, 1:GRAY, 2:GREEN, 3:ORANGE, 4:PURPLE, 5:RED, 6:SKY BLUE",
        "",
    ),
    MenuDescriptor::new(
        "118",
        "WATERFALL COLOR",
        "0:BLUE, 1:GRAY, 2:GREEN, 3:ORANGE, 4:PURPLE, 5:RED, 6:SKY BLUE, 7:MULTI",
        "",
    ),
    MenuDescriptor::new(
        "119",
        "PRMTRC EQ1 FREQ",
        "0:OFF, 1:100Hz, 2:200Hz, 3:300Hz, 4:400Hz, 5:500Hz, 6:600Hz, 7:700Hz",
        "",
    ),
    MenuDescriptor::new("120", "PRMTRC EQ1 LEVEL", "-20 to +10", ""),
    MenuDescriptor::new("121", "PRMTRC EQ1 BWTH", "1-10", ""),
    MenuDescriptor::new(
        "122",
        "PRMTRC EQ2 FREQ",
        "0:OFF, 1:700Hz, 2:800Hz, 3:900Hz, 4:1000Hz, 5:1100Hz, 6:1200Hz, 7:1300Hz, 8:1400Hz, 9:1500Hz",
        "",
    ),
    MenuDescriptor::new("123", "PRMTRC EQ2 LEVEL", "-20 to +10", ""),
    MenuDescriptor::new("124", "PRMTRC EQ2 BWTH", "1-10", ""),
    MenuDescriptor::new(
        "125",
        "PRMTRC EQ3 FREQ",
        "0:OFF, 1:1500Hz, 2:1600Hz, 3:1700Hz, 4:1800Hz, 5:1900Hz, 6:2000Hz-18:3200Hz",
        "",
    ),
    MenuDescriptor::new("126", "PRMTRC EQ3 LEVEL", "-20 to +10", ""),
    MenuDescriptor::new("127", "PRMTRC EQ3 BWTH", "1-10", ""),
    MenuDescriptor::new(
        "128",
        "P-PRMTRC EQ1 FREQ",
        "0:OFF, 1:100Hz, 2:200Hz, 3:300Hz, 4:400Hz, 5:500Hz, 6:600Hz, 7:700Hz",
        "",
    ),
    MenuDescriptor::new("129", "P-PRMTRC EQ1 LEVEL", "-20 to +10", ""),
    MenuDescriptor::new("130", "P-PRMTRC EQ1 BWTH", "1-10", ""),
    MenuDescriptor::new(
        "131",
        "P-PRMTRC EQ2 FREQ",
        "0:OFF, 1:700Hz, 2:800Hz, 3:900Hz, 4:1000Hz, 5:1100Hz, 6:1200Hz, 7:1300Hz, 8:1400Hz, 9:1500Hz",
        "",
    ),
    MenuDescriptor::new("132", "P-PRMTRC EQ2 LEVEL", "-20 to +10", ""),
    MenuDescriptor::new("133", "P-PRMTRC EQ2 BWTH", "1-10", ""),
    MenuDescriptor::new(
        "134",
        "P-PRMTRC EQ3 FREQ",
        "0:OFF, 1:1500Hz, 2:1600Hz, 3:1700Hz, 4:1800Hz, 5:1900Hz, 6:2000Hz-18:3200Hz",
        "",
    ),
    MenuDescriptor::new("135", "P-PRMTRC EQ3 LEVEL", "-20 to +10", ""),
    MenuDescriptor::new("136", "P-PRMTRC EQ3 BWTH", "1-10", ""),
    MenuDescriptor::new("137", "HF TX MAX POWER", "5-100", "W"),
    MenuDescriptor::new("138", "50M TX MAX POWER", "5-100", "W"),
    MenuDescriptor::new("139", "144M TX MAX POWER", "5-50", "W"),
    MenuDescriptor::new("140", "430M TX MAX POWER", "5-50", "W"),
    MenuDescriptor::new(
        "141",
        "TUNER SELECT",
        "0:OFF, 1:INTERNAL, 2:EXTERNAL, 3:ATAS, 4:LAMP",
        "",
    ),
    MenuDescriptor::new("142", "VOX SELECT", "0:MIC, 1:DATA", ""),
    MenuDescriptor::new("143", "VOX GAIN", "0-100", ""),
    MenuDescriptor::new("144", "VOX DELAY", "30-3000", "ms"),
    MenuDescriptor::new("145", "ANTI VOX GAIN", "0-100", ""),
    MenuDescriptor::new("146", "DATA VOX GAIN", "0-100", ""),
    MenuDescriptor::new("147", "DATA VOX DELAY", "30-3000", "ms"),
    MenuDescriptor::new("148", "ANTI DVOX GAIN", "0-100", ""),
    MenuDescriptor::new("149", "EMERGENCY FREQ TX", "0:DISABLE, 1:ENABLE", ""),
    MenuDescriptor::new("150", "PRT/WIRES FREQ", "0:MANUAL, 1:PRESET", ""),
    MenuDescriptor::new("151", "PRESET FREQUENCY", "3000000-47000000", "Hz"),
    MenuDescriptor::new("152", "SEARCH SETUP", "0:HISTORY, 1:ACTIVITY", ""),
    MenuDescriptor::new("153", "WIRES DG-ID", "0:AUTO, 1-99:DG-ID", ""),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_dense_and_ordered() {
        assert_eq!(MENU_ITEMS.len(), 153);
        for (idx, item) in MENU_ITEMS.iter().enumerate() {
            assert_eq!(item.code, format!("{:03}", idx + 1));
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe("031").unwrap().description, "CAT RATE");
        assert_eq!(describe("153").unwrap().description, "WIRES DG-ID");
        assert_eq!(describe("000"), None);
        assert_eq!(describe("154"), None);
        assert_eq!(describe("31"), None);
    }

    #[test]
    fn test_codes_are_three_digits() {
        for item in MENU_ITEMS {
            assert_eq!(item.code.len(), 3);
            assert!(item.code.bytes().all(|b| b.is_ascii_digit()));
        }
    }
}
