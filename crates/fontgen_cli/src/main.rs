use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fontgen_render::{
    IntensityMap, PackedGlyph, RowPacker, TableOptions, TableRenderer, PRINTABLE_ASCII,
};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate embedded C font tables from TTF/OTF fonts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rasterize printable ASCII and write the C source table
    Generate(GenerateArgs),
    /// Print one thresholded glyph to stdout for quick tuning
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input TTF/OTF font path
    font: PathBuf,
    /// Output C source path
    #[arg(short, long)]
    output: PathBuf,
    /// sFONT symbol name; derived from the font file name when omitted
    #[arg(short = 'n', long)]
    font_name: Option<String>,
    /// Directory for per-glyph BMP dumps
    #[arg(short, long)]
    bmp_dir: Option<PathBuf>,
    #[command(flatten)]
    settings: CellSettings,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input TTF/OTF font path
    font: PathBuf,
    /// Character to preview
    #[arg(long, default_value_t = 'A')]
    glyph: char,
    #[command(flatten)]
    settings: CellSettings,
}

#[derive(Parser, Debug, Clone)]
struct CellSettings {
    /// Cell height in pixels
    #[arg(long, default_value_t = 36)]
    height: u32,
    /// Cell width in pixels
    #[arg(long, default_value_t = 22)]
    width: u32,
    /// Intensity cutoff (0-255); pixels above it become foreground
    #[arg(long, default_value_t = 120)]
    threshold: u8,
    /// Margin subtracted from the height to get the font size; 4 or more
    /// leaves room for ascenders and descenders
    #[arg(long, default_value_t = 4)]
    font_offset: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Preview(args) => preview(args),
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    if !args.font.is_file() {
        anyhow::bail!("font file {:?} can not be read", args.font);
    }

    let options = args.settings.to_options();
    let renderer = TableRenderer::from_path(&args.font)
        .with_context(|| format!("failed to load font {:?}", args.font))?;
    let packer = RowPacker::new(options.threshold);
    let font_name =
        args.font_name.clone().unwrap_or_else(|| derive_font_name(&args.font, options.height));

    println!(
        "Generating font '{}' in {:?} from TTF file {:?}",
        font_name, args.output, args.font
    );

    if let Some(dir) = &args.bmp_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create BMP directory {:?}", dir))?;
    }

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {:?}", args.output))?;
    let mut writer = BufWriter::new(file);
    write_table_header(&mut writer, options.height)?;

    let progress = ProgressBar::new(PRINTABLE_ASCII.count() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} glyphs",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    for code in PRINTABLE_ASCII {
        let ch = char::from(code);
        let cell = renderer
            .render_glyph(ch, &options)
            .with_context(|| format!("failed to rasterize ASCII {} {:?}", code, ch))?;

        if let Some(dir) = &args.bmp_dir {
            let bmp_path = dir.join(format!("{}.bmp", code));
            cell.save(&bmp_path).with_context(|| format!("failed to write {:?}", bmp_path))?;
        }

        let packed = packer.pack(&IntensityMap::from_cell(&cell));
        write_glyph_block(&mut writer, code, options.width, &packed)?;
        progress.inc(1);
    }

    write_table_footer(&mut writer, &font_name, options.width, options.height)?;
    writer.flush().with_context(|| format!("failed to flush {:?}", args.output))?;
    progress.finish_with_message(format!("Table written to {:?}", args.output));

    Ok(())
}

fn preview(args: PreviewArgs) -> Result<()> {
    if !args.font.is_file() {
        anyhow::bail!("font file {:?} can not be read", args.font);
    }

    let options = args.settings.to_options();
    let renderer = TableRenderer::from_path(&args.font)
        .with_context(|| format!("failed to load font {:?}", args.font))?;
    let packed = renderer
        .pack_glyph(args.glyph, &options)
        .with_context(|| format!("failed to rasterize {:?}", args.glyph))?;

    for row in packed.rows() {
        let line: String = (0..options.width as usize)
            .map(|x| if (row[x / 8] >> (7 - x % 8)) & 1 == 1 { '█' } else { ' ' })
            .collect();
        println!("{}", line);
    }

    Ok(())
}

/// Builds the sFONT symbol: "Font" plus the file stem stripped of spaces
/// and hyphens, plus the cell height.
fn derive_font_name(font_path: &Path, height: u32) -> String {
    let stem = font_path.file_stem().and_then(|stem| stem.to_str()).unwrap_or_default();
    let cleaned: String = stem.chars().filter(|c| *c != ' ' && *c != '-').collect();
    format!("Font{}{}", cleaned, height)
}

fn write_table_header<W: Write>(writer: &mut W, height: u32) -> Result<()> {
    writeln!(
        writer,
        "/* Includes ------------------------------------------------------------------*/"
    )?;
    writeln!(writer, "#include \"fonts.h\"")?;
    writeln!(writer, "static const uint8_t Font{}_Table [] = ", height)?;
    writeln!(writer, "{{")?;
    Ok(())
}

fn write_glyph_block<W: Write>(
    writer: &mut W,
    code: u8,
    width: u32,
    packed: &PackedGlyph,
) -> Result<()> {
    writeln!(writer, "\t// ASCII: {} \"{}\" ({} pixels wide)", code, char::from(code), width)?;

    let literals: Vec<String> = packed.hex_literals().collect();
    for line in literals.chunks(3) {
        write!(writer, "\t")?;
        for literal in line {
            write!(writer, "{}, ", literal)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn write_table_footer<W: Write>(
    writer: &mut W,
    font_name: &str,
    width: u32,
    height: u32,
) -> Result<()> {
    writeln!(writer, "}};")?;
    writeln!(writer)?;
    writeln!(writer, "sFONT {} = {{", font_name)?;
    writeln!(writer, "\tFont{}_Table,", height)?;
    writeln!(writer, "\t{}, /* Width */", width)?;
    writeln!(writer, "\t{}, /* Height */", height)?;
    writeln!(writer, "}};")?;
    writeln!(writer)?;
    Ok(())
}

impl CellSettings {
    fn to_options(&self) -> TableOptions {
        TableOptions {
            height: self.height,
            width: self.width,
            threshold: self.threshold,
            font_offset: self.font_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_name_derivation_strips_spaces_and_hyphens() {
        assert_eq!(
            derive_font_name(Path::new("fonts/Roboto-Regular.ttf"), 36),
            "FontRobotoRegular36"
        );
        assert_eq!(derive_font_name(Path::new("My Cool Font.otf"), 24), "FontMyCoolFont24");
    }

    #[test]
    fn table_header_declares_the_height_named_table() {
        let mut out = Vec::new();
        write_table_header(&mut out, 36).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("/* Includes "));
        assert!(text.contains("#include \"fonts.h\"\n"));
        assert!(text.contains("static const uint8_t Font36_Table [] = \n{\n"));
    }

    #[test]
    fn glyph_block_emits_three_bytes_per_line() {
        let packed = RowPacker::new(0).pack(&IntensityMap::from_raw(22, 2, vec![255; 44]));
        let mut out = Vec::new();
        write_glyph_block(&mut out, 65, 22, &packed).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("\t// ASCII: 65 \"A\" (22 pixels wide)"));
        assert_eq!(lines.next(), Some("\t0xff, 0xff, 0xfc, "));
        assert_eq!(lines.next(), Some("\t0xff, 0xff, 0xfc, "));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn table_footer_matches_the_sfont_convention() {
        let mut out = Vec::new();
        write_table_footer(&mut out, "FontRobotoRegular36", 22, 36).unwrap();

        let expected =
            "};\n\nsFONT FontRobotoRegular36 = {\n\tFont36_Table,\n\t22, /* Width */\n\t36, /* Height */\n};\n\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
