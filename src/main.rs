use std::{error::Error, process::ExitCode};

use mytb::{
    config::StorageConfig,
    storage::{
        column::ColumnType,
        fs::FileSystem,
        schema::Schema,
        table::TableFileManager,
    },
};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing_subscriber::EnvFilter;

fn read_line(rl: &mut DefaultEditor, prompt: &str) -> Result<String, ReadlineError> {
    let line = rl.readline(prompt)?;
    Ok(line.trim().to_string())
}

fn read_column_count(rl: &mut DefaultEditor) -> Result<u32, ReadlineError> {
    loop {
        let input = read_line(rl, "Enter number of columns: ")?;
        match input.parse::<u32>() {
            Ok(count) => return Ok(count),
            Err(_) => println!("'{}' is not a valid column count", input),
        }
    }
}

fn read_column_type(rl: &mut DefaultEditor, index: u32) -> Result<ColumnType, ReadlineError> {
    let prompt = format!(
        "Enter type for column {} (1 = INT, 2 = TEXT, 3 = FLOAT): ",
        index
    );
    loop {
        let input = read_line(rl, &prompt)?;
        match input.parse::<u8>().map(ColumnType::from_tag) {
            Ok(column_type) if column_type.is_known() => return Ok(column_type),
            _ => println!("'{}' is not a valid column type", input),
        }
    }
}

fn run(rl: &mut DefaultEditor) -> Result<(), Box<dyn Error>> {
    let table_name = read_line(rl, "Enter the table name: ")?;
    if table_name.is_empty() {
        return Err("table name must not be empty".into());
    }

    let mut manager = TableFileManager::on_disk(StorageConfig::from_env());
    manager.create_table(&table_name)?;
    println!(
        "Table '{}' created successfully as {}",
        table_name,
        manager.table_path(&table_name).display()
    );

    let header = manager.read_header(&table_name)?;
    println!("Table Header for '{}':\n{}", table_name, header);

    let column_count = read_column_count(rl)?;
    let mut schema = Schema::default();
    for i in 1..=column_count {
        // Names are taken verbatim, spaces included
        let name = rl.readline(&format!("Enter name for column {}: ", i))?;
        let column_type = read_column_type(rl, i)?;
        schema.add_column(name, column_type);
    }

    let path = manager.table_path(&table_name);
    let mut file = manager.filesystem().open_write(&path)?;
    schema.write_at(&mut file, manager.schema_offset())?;
    drop(file);

    print!("{}", schema);
    println!("Schema added successfully to table '{}'!", table_name);

    Ok(())
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match run(&mut rl) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ReadlineError>() {
                Some(ReadlineError::Interrupted) => println!("Interrupted"),
                Some(ReadlineError::Eof) => println!("EOF"),
                _ => eprintln!("Error: {}", err),
            }
            ExitCode::FAILURE
        }
    }
}
