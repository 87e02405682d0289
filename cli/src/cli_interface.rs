use clap::{Args, Parser};

#[allow(clippy::upper_case_acronyms)]
#[derive(Parser, Debug)]
#[clap(name = "sqlgen", about, version)]
pub struct CLI {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Parser, Debug)]
#[clap(about = "Turn CSV files into batched SQL INSERT statements", long_about = None)]
pub enum Commands {
    /// Writes a default sqlgen.yaml to describe a conversion.
    ///
    /// Every option has a default so the file only needs the source filled
    /// in. Refuses to overwrite an existing sqlgen.yaml.
    ///
    /// Example:
    /// `sqlgen init --source data/users.csv`
    #[clap(name = "init")]
    Init {
        /// optional - The CSV file the manifest should point at.
        #[clap(long, short)]
        source: Option<String>,

        /// optional - The path to create the manifest in, default will be where the command is run.
        #[clap(long, short)]
        path: Option<String>,
    },

    /// Converts a CSV file into INSERT statements split across .sql files.
    ///
    /// Without an input the conversion is read from sqlgen.yaml, any flags
    /// given override what the manifest says.
    ///
    /// Example:
    /// `sqlgen convert users.csv --rows-per-insert 1000` or `sqlgen convert`
    #[clap(name = "convert")]
    Convert {
        /// optional - The CSV file to convert, default reads sqlgen.yaml.
        input: Option<String>,

        #[clap(flatten)]
        options: ConvertArgs,

        /// optional - The path to run the command in, default will be where the command is run.
        #[clap(long, short)]
        path: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ConvertArgs {
    /// Target table, defaults to the file name without extension.
    #[clap(long, short)]
    pub table_name: Option<String>,

    /// Directory the .sql files are written to.
    #[clap(long, short)]
    pub output_dir: Option<String>,

    /// Maximum size of a single .sql file in MiB.
    #[clap(long)]
    pub max_file_size_mb: Option<u64>,

    /// Rows per INSERT statement.
    #[clap(long, short)]
    pub rows_per_insert: Option<usize>,

    /// Value rendered as NULL, repeat for several. Replaces the defaults.
    #[clap(long = "null-value")]
    pub null_values: Vec<String>,

    /// Column name to use instead of the header, repeat for every column. The
    /// first CSV line is then treated as data.
    #[clap(long = "column")]
    pub columns: Vec<String>,

    /// Print the first lines of the generated SQL.
    #[clap(long)]
    pub preview: bool,

    /// Hide the progress bars.
    #[clap(long)]
    pub no_progress: bool,

    /// Join values with `,` instead of `, `.
    #[clap(long)]
    pub compact: bool,
}
